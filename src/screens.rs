use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub background_color: &'static str,
}

/// Carousel page with one external document behind its button.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoPage {
    pub title: &'static str,
    pub slides: &'static [Slide],
    pub document_url: &'static str,
}

static INTERNSHIP_SLIDES: [Slide; 2] = [
    Slide {
        id: "1",
        title: "Sobre o Estágio:",
        description: "O Estágio no IFPE Campus Igarassu proporciona experiência prática aos estudantes, complementando a formação acadêmica.",
        background_color: "#DFFFD6",
    },
    Slide {
        id: "2",
        title: "Para mais informações:",
        description: "",
        background_color: "#DFFFD6",
    },
];

pub fn internship_page() -> InfoPage {
    InfoPage {
        title: "Estagio",
        slides: &INTERNSHIP_SLIDES,
        document_url: "https://portal.ifpe.edu.br/wp-content/uploads/repositoriolegado/igarassu/documentos/edital-no-01-2022-dgcigr-selecao-de-estagiarios_assinado.pdf",
    }
}
