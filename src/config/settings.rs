#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub default_path: &'static str,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            default_path: "guild_war.db",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// ASCII fallback used in the plain `filename` parameter.
    pub ascii_filename: &'static str,
    /// Display name advertised via the RFC 5987 `filename*` parameter.
    pub display_filename: &'static str,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            ascii_filename: "guild_war_roster.xlsx",
            display_filename: "醉臥泡影間.xlsx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            export: ExportSettings::default(),
        }
    }
}
