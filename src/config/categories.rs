use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of forensic groupings artifacts are sorted into.
///
/// Variant order is the default match order used by [`CategoryTable`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    AuthAndUsers,
    CronPersistence,
    SshConfig,
    SystemAndAuthLogs,
    TempSuspicious,
    WebServer,
    Hashes,
}

impl CategoryId {
    pub const ALL: [CategoryId; 7] = [
        CategoryId::AuthAndUsers,
        CategoryId::CronPersistence,
        CategoryId::SshConfig,
        CategoryId::SystemAndAuthLogs,
        CategoryId::TempSuspicious,
        CategoryId::WebServer,
        CategoryId::Hashes,
    ];

    /// Directory name of this category in the output tree
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::AuthAndUsers => "auth_and_users",
            CategoryId::CronPersistence => "cron_persistence",
            CategoryId::SshConfig => "ssh_config",
            CategoryId::SystemAndAuthLogs => "system_and_auth_logs",
            CategoryId::TempSuspicious => "temp_suspicious",
            CategoryId::WebServer => "web_server",
            CategoryId::Hashes => "hashes",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category and the keywords that route files into it.
///
/// An empty keyword list marks a category that is filled by its own
/// collection rule (the hash listings) and never by keyword matching.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(id: CategoryId, keywords: &[&str]) -> Self {
        Category {
            id,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword (in list order) contained in an already lower-cased name
    pub fn matched_keyword(&self, lower_name: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| lower_name.contains(keyword))
    }
}

/// Outcome of a successful classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMatch<'a> {
    pub category: CategoryId,
    pub keyword: &'a str,
}

/// Ordered category table. Definition order decides ties.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        CategoryTable { categories }
    }

    /// Assign a file name to the first category with a keyword contained in
    /// the lower-cased name. Sentinel categories never match.
    pub fn classify(&self, file_name: &str) -> Option<CategoryMatch<'_>> {
        let lower = file_name.to_lowercase();
        self.categories
            .iter()
            .filter(|category| !category.is_sentinel())
            .find_map(|category| {
                category.matched_keyword(&lower).map(|keyword| CategoryMatch {
                    category: category.id,
                    keyword,
                })
            })
    }

    /// Keyword of one specific category matched by a file name
    pub fn matched_keyword(&self, id: CategoryId, file_name: &str) -> Option<&str> {
        let lower = file_name.to_lowercase();
        self.get(id).and_then(|category| category.matched_keyword(&lower))
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.iter().map(|category| category.id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub(crate) fn categories_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable::new(vec![
            Category::new(
                CategoryId::AuthAndUsers,
                &[
                    "passwd",
                    "shadow",
                    "group",
                    "login",
                    "who",
                    "lastlog",
                    "bash_history",
                    ".bash_history",
                    "sudoers",
                ],
            ),
            Category::new(
                CategoryId::CronPersistence,
                &["cron", "crontab", "at", "systemd-timers"],
            ),
            Category::new(
                CategoryId::SshConfig,
                &["sshd_config", "authorized_keys", "known_hosts"],
            ),
            Category::new(
                CategoryId::SystemAndAuthLogs,
                &["syslog", "auth.log", "secure", "messages", "dmesg"],
            ),
            Category::new(
                CategoryId::TempSuspicious,
                &["tmp", "temp", "suspicious", "malware", "binwalk"],
            ),
            Category::new(
                CategoryId::WebServer,
                &["apache", "nginx", "httpd", "access.log", "error.log"],
            ),
            Category::new(CategoryId::Hashes, &[]),
        ])
    }
}
