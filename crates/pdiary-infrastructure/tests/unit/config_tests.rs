//! Tests for configuration loading

use figment::Jail;
use pdiary_domain::error::Error;
use pdiary_infrastructure::config::loader::validate_app_config;
use pdiary_infrastructure::config::{AppConfig, LoggingConfig, StorageConfig};
use pdiary_infrastructure::ConfigLoader;
use std::path::PathBuf;

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json_format);
    assert!(config.logging.file_output.is_none());
    validate_app_config(&config).unwrap();
}

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_file_then_environment_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "pdiary.toml",
            r#"
                [logging]
                level = "debug"

                [storage]
                provider = "memory"
            "#,
        )?;
        jail.set_env("PDIARY_LOGGING__JSON_FORMAT", "true");
        jail.set_env("PDIARY_LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json_format);
        assert_eq!(config.storage.provider, "memory");
        Ok(())
    });
}

#[test]
fn test_config_in_subdirectory_is_found() {
    Jail::expect_with(|jail| {
        std::fs::create_dir("pdiary").map_err(|e| e.to_string())?;
        jail.create_file("pdiary/pdiary.toml", "[logging]\nlevel = \"trace\"\n")?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "trace");
        Ok(())
    });
}

#[test]
fn test_explicit_path() {
    Jail::expect_with(|jail| {
        let state_dir = jail.directory().join("state");
        jail.create_file(
            "custom.toml",
            &format!(
                "[storage]\nprovider = \"filesystem\"\npath = \"{}\"\n",
                state_dir.display()
            ),
        )?;

        let path = jail.directory().join("custom.toml");
        let loader = ConfigLoader::new().with_config_path(&path);

        let config = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(config.storage, StorageConfig::filesystem(state_dir));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let err = ConfigLoader::new()
        .with_config_path("/nonexistent/pdiary.toml")
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("pdiary.toml", "[logging]\nlevel = \"chatty\"\n")?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });

    let unknown = AppConfig {
        storage: StorageConfig {
            provider: "carrier-pigeon".to_string(),
            path: None,
        },
        ..AppConfig::default()
    };
    assert!(validate_app_config(&unknown).is_err());

    let filesystem_without_path = AppConfig {
        storage: StorageConfig {
            provider: "filesystem".to_string(),
            path: None,
        },
        ..AppConfig::default()
    };
    assert!(matches!(
        validate_app_config(&filesystem_without_path),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_save_and_reload() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("saved.toml");
        let config = AppConfig {
            logging: LoggingConfig {
                level: "error".to_string(),
                json_format: true,
                file_output: Some(PathBuf::from("/var/log/pdiary.log")),
            },
            storage: StorageConfig::filesystem(jail.directory().join("state")),
        };

        let loader = ConfigLoader::new().with_config_path(&path);
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;
        assert_eq!(loader.load().map_err(|e| e.to_string())?, config);
        Ok(())
    });
}

#[test]
fn test_storage_maps_to_provider_config() {
    let provider = StorageConfig::filesystem("/data/pdiary").to_provider_config();
    assert_eq!(provider.provider, "filesystem");
    assert_eq!(provider.path, Some(PathBuf::from("/data/pdiary")));

    let provider = StorageConfig::in_memory().to_provider_config();
    assert_eq!(provider.provider, "memory");
    assert!(provider.path.is_none());
}
