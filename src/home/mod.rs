//! Header and menu logic of the home screen.

pub mod menu;

pub use menu::{menu_item, menu_items, Destination, MenuAction, MenuIcon, MenuItem};

use crate::config::USER_NAME_KEY;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_USER_NAME: &str = "Usuário";

pub const SHARE_MESSAGE: &str = "🎉 O Campus Connect é para TODOS! 📲

Se você é aluno do campus, independentemente do seu curso, seja Administração, Logística, Qualidade ou qualquer outro. Sim, você pode baixar e usar o nosso app! 🚀✨

🔗 Baixe o app agora mesmo:
https://drive.google.com/file/d/1qnnT8aKB82pP_gu0CuLFApVelYzWGzm7/view?usp=drive_link

A equipe do Campus Connect agradece! 💚📚";

/// Greeting for a local hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Bom dia"
    } else if hour < 18 {
        "Boa tarde"
    } else {
        "Boa noite"
    }
}

pub fn greeting_line(hour: u32, name: &str) -> String {
    format!("{}, {}!", greeting(hour), name)
}

/// Stored display name, or the default when unset or unreadable.
pub async fn load_user_name(store: &dyn KeyValueStore) -> String {
    match store.get(USER_NAME_KEY).await {
        Ok(Some(name)) if !name.is_empty() => name,
        Ok(_) => {
            debug!("No stored user name");
            DEFAULT_USER_NAME.to_string()
        }
        Err(e) => {
            warn!("Could not read user name: {}", e);
            DEFAULT_USER_NAME.to_string()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
}

/// Whether the bell shows its badge.
pub fn has_unread(notifications: &[Notification]) -> bool {
    notifications.iter().any(|n| !n.read)
}
