use serde::Serialize;

pub const LOGIN_ROUTE: &str = "/Screens/Login";
pub const ADMIN_ROUTE: &str = "/Screens/Notification/UpdateNotification";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum MenuAction {
    Navigate(&'static str),
    OpenUrl(&'static str),
    /// Admin screen for signed-in staff, login otherwise.
    AdminArea,
}

/// Where a menu press ends up once auth state is known.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Destination {
    Screen(String),
    External(String),
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuIcon {
    Glyph(&'static str),
    /// Bundled image asset.
    Image(&'static str),
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u8,
    pub label: &'static str,
    pub icon: MenuIcon,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn resolve(&self, authenticated: bool) -> Destination {
        match self.action {
            MenuAction::Navigate(route) => Destination::Screen(route.to_string()),
            MenuAction::OpenUrl(url) => Destination::External(url.to_string()),
            MenuAction::AdminArea if authenticated => Destination::Screen(ADMIN_ROUTE.to_string()),
            MenuAction::AdminArea => Destination::Screen(LOGIN_ROUTE.to_string()),
        }
    }
}

const fn screen(id: u8, label: &'static str, icon: &'static str, route: &'static str) -> MenuItem {
    MenuItem {
        id,
        label,
        icon: MenuIcon::Glyph(icon),
        action: MenuAction::Navigate(route),
    }
}

const fn link(id: u8, label: &'static str, icon: MenuIcon, url: &'static str) -> MenuItem {
    MenuItem {
        id,
        label,
        icon,
        action: MenuAction::OpenUrl(url),
    }
}

static MENU_ITEMS: [MenuItem; 16] = [
    screen(1, "Calendário Acadêmico", "calendar-month", "/Screens/Calendar"),
    screen(2, "Cursos", "notebook-edit", "/Screens/Cursos"),
    screen(3, "Horários dos Ônibus", "bus-clock", "/Screens/Linha"),
    screen(4, "Horários das Aulas", "clock", "/Screens/Aulas"),
    screen(5, "WhatsApp", "whatsapp", "/Screens/Whats"),
    screen(6, "Contatos", "email", "/Screens/Contato"),
    link(
        7,
        "Acesso ao QAcadêmico",
        MenuIcon::Glyph("web"),
        "https://qacademico.ifpe.edu.br/",
    ),
    link(
        8,
        "Requerimentos CRADT",
        MenuIcon::Glyph("file-document-edit"),
        "https://docs.google.com/forms/d/e/1FAIpQLSfny1cPy4j0pIMy1A8XL1mq9lf6ZoalVkhTpMwHdyjhQZhkAw/viewform",
    ),
    screen(9, "Bolsas e Estágios", "briefcase-account", "/Screens/Bolsas"),
    screen(10, "Núcleos de Apoio", "account-group", "/Screens/Nucleos"),
    screen(11, "Setores", "office-building", "/Screens/Setores"),
    screen(12, "Serviço de Orientação Psicológica", "head-heart", "/Screens/Servico"),
    screen(13, "Carteira de Estudante", "card-account-details", "/Screens/Carteira"),
    link(
        14,
        "Portal Campus Igarassu",
        MenuIcon::Image("Menuindex/Logoif.png"),
        "https://portal.ifpe.edu.br/igarassu/",
    ),
    screen(15, "FAQ", "help-circle", "/Screens/FAQ"),
    MenuItem {
        id: 16,
        label: "Administrador",
        icon: MenuIcon::Glyph("account-lock"),
        action: MenuAction::AdminArea,
    },
];

pub fn menu_items() -> &'static [MenuItem] {
    &MENU_ITEMS
}

pub fn menu_item(id: u8) -> Option<&'static MenuItem> {
    MENU_ITEMS.iter().find(|item| item.id == id)
}
