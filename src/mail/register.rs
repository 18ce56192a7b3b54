use crate::errors::Result;
use crate::mail::Mailer;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

pub type MailerConstructor = Arc<dyn Fn() -> Result<Arc<dyn Mailer>> + Send + Sync>;

static MAILER_REGISTRY: Lazy<RwLock<HashMap<String, MailerConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_mailer_plugin<S: Into<String>>(name: S, constructor: MailerConstructor) {
    MAILER_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), constructor);
}

pub fn get_mailer_plugin(name: &str) -> Option<MailerConstructor> {
    MAILER_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mailers_registered() {
        assert!(get_mailer_plugin("console").is_some());
        assert!(get_mailer_plugin("smtp").is_some());
        assert!(get_mailer_plugin("sendgrid").is_none());
    }
}
