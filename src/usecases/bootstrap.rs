use std::path::Path;

use crate::{
    infra::{self, error::AppError},
    usecases::context::ChatContext,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<ChatContext, AppError> {
    let context = build_context(config_path)?;
    infra::logging::init(&context.config.logging)?;

    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<ChatContext, AppError> {
    let config = infra::config::load(config_path)?;

    Ok(ChatContext::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, crate::infra::config::AppConfig::default());
    }
}
