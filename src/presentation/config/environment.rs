use std::fmt;

pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

/// Deployment stage, selecting which `appsettings.*` file is layered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Test,
    Prod,
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, defaulting to local when unset.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) => value.try_into(),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    pub fn settings_file(&self) -> String {
        format!("appsettings.{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(format!(
                "Invalid {ENVIRONMENT_VAR}: {other}. Expected: local, test, or prod"
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
