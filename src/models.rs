use serde::{Deserialize, Serialize};

/// Developer specialisation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::WebDevelopment,
        Domain::MachineLearning,
        Domain::MobileDevelopment,
        Domain::DataScience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::WebDevelopment => "Web Development",
            Domain::MachineLearning => "Machine Learning",
            Domain::MobileDevelopment => "Mobile Development",
            Domain::DataScience => "Data Science",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A developer profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub username: String,
    /// Score in [0, 10]
    pub talent_rank: f64,
    pub nation: Option<String>,
    pub domain: Domain,
}

impl Developer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        talent_rank: f64,
        nation: Option<&str>,
        domain: Domain,
    ) -> Self {
        Developer {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            talent_rank,
            nation: nation.map(String::from),
            domain,
        }
    }

    /// Copy of this developer with the nation replaced
    pub fn with_nation(&self, nation: impl Into<String>) -> Self {
        Developer {
            nation: Some(nation.into()),
            ..self.clone()
        }
    }

    /// Copy of this developer with the talent rank replaced
    pub fn with_talent_rank(&self, talent_rank: f64) -> Self {
        Developer {
            talent_rank,
            ..self.clone()
        }
    }
}

/// The seed data loaded once at startup
pub fn fixture_developers() -> Vec<Developer> {
    vec![
        Developer::new("1", "John Doe", "johndoe", 8.7, Some("USA"), Domain::WebDevelopment),
        Developer::new("2", "Jane Smith", "janesmith", 9.2, None, Domain::MachineLearning),
        Developer::new("3", "Zhang Wei", "zhangwei", 8.9, Some("China"), Domain::MobileDevelopment),
        Developer::new("4", "Maria Garcia", "mariagarcia", 7.8, None, Domain::DataScience),
        Developer::new("5", "Alex Johnson", "alexj", 8.5, Some("Canada"), Domain::WebDevelopment),
    ]
}

/// Severity of a status bar notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationLevel {
    Success,
    Info,
}

/// Transient message shown in the status bar
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            level: NotificationLevel::Success,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            level: NotificationLevel::Info,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>, ttl: std::time::Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        now - self.created_at >= ttl
    }
}
