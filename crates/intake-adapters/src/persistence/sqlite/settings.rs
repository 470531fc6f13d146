use async_trait::async_trait;

use intake_core::settings::AdmissibilitySettings;
use intake_ports::error::PortError;
use intake_ports::outbound::SettingsProvider;

use super::SqliteDb;

impl SqliteDb {
    pub async fn save_settings(&self, settings: &AdmissibilitySettings) -> Result<(), PortError> {
        let data =
            serde_json::to_string(settings).map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "INSERT INTO admissibility_settings (id, data) VALUES (1, ?)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        )
        .bind(&data)
        .execute(self.pool())
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SettingsProvider for SqliteDb {
    /// A database without a settings row behaves like a freshly installed
    /// instance: defaults apply until an admin saves a configuration.
    async fn current(&self) -> Result<AdmissibilitySettings, PortError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM admissibility_settings WHERE id = 1")
                .fetch_optional(self.pool())
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;

        match row {
            Some((data,)) => {
                serde_json::from_str(&data).map_err(|e| PortError::Malformed(e.to_string()))
            }
            None => Ok(AdmissibilitySettings::default()),
        }
    }
}
