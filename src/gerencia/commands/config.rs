use crate::commands::{CmdMessage, CmdResult, GerenciaPaths};
use crate::config::GerenciaConfig;
use crate::error::{GerenciaError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &GerenciaPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data;
    match action {
        ConfigAction::ShowAll => {
            let config = GerenciaConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = GerenciaConfig::load(dir)?;
            let val = config
                .get(&key)
                .ok_or_else(|| GerenciaError::Config(format!("Unknown config key: {}", key)))?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(val));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = GerenciaConfig::load(dir)?;
            config.set(&key, &value)?;
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    fn paths(dir: &tempfile::TempDir) -> GerenciaPaths {
        GerenciaPaths {
            data: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir);

        let set = run(
            &paths,
            ConfigAction::Set("report-preview".into(), "3".into()),
        )
        .unwrap();
        assert!(matches!(set.messages[0].level, MessageLevel::Success));

        let shown = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config.unwrap().report_preview, 3);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&paths(&dir), ConfigAction::ShowKey("colour".into())).unwrap_err();
        assert!(matches!(err, GerenciaError::Config(_)));

        let err = run(
            &paths(&dir),
            ConfigAction::Set("colour".into(), "red".into()),
        )
        .unwrap_err();
        assert!(matches!(err, GerenciaError::Config(_)));
    }

    #[test]
    fn invalid_value_is_an_error_and_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(&dir);
        let err = run(
            &paths,
            ConfigAction::Set("report-preview".into(), "lots".into()),
        )
        .unwrap_err();
        assert!(matches!(err, GerenciaError::Config(_)));
        assert!(!dir.path().join("config.json").exists());
    }
}
