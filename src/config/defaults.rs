use std::path::PathBuf;

pub fn default_local_binary() -> PathBuf {
    PathBuf::from("vendor/bin/phpstan")
}

pub fn default_level() -> String {
    "max".to_string()
}

pub fn default_timeout_sec() -> u64 {
    120
}

pub fn default_include() -> Vec<String> {
    vec!["**/*.php".to_string()]
}

pub fn default_exclude() -> Vec<String> {
    vec!["vendor/**".to_string(), "**/vendor/**".to_string()]
}

pub fn default_config_markers() -> Vec<String> {
    vec![
        "phpstan.neon".to_string(),
        "phpstan.neon.dist".to_string(),
        "phpstan.dist.neon".to_string(),
    ]
}

pub fn default_autoload_file() -> PathBuf {
    PathBuf::from("vendor/autoload.php")
}
