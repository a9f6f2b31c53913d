//! Configuration-driven spelunkers.

use std::fs;

use pretty_assertions::assert_eq;
use spelunk_core::{Builtin, SpelunkError, Spelunker, SpelunkerConfig};
use spelunk_reflect::Record;
use tempfile::TempDir;

#[derive(Record, Debug, Default)]
struct Signup {
    #[tags(sanitize = "trim,clean")]
    email: String,
    #[tags(sanitize = "at_least:13,at_most:120")]
    age: u16,
    #[tags(spelunk = "clean")]
    untouched: String,
}

fn write_config(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("spelunk.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_config_file_drives_handlers() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "tag": "sanitize",
            "handlers": {
                "trim": "trim",
                "clean": "lowercase",
                "at_least": "min",
                "at_most": "max"
            }
        }"#,
    );

    let config = SpelunkerConfig::from_file(&path).unwrap();
    assert_eq!(config.handlers.get("clean"), Some(&Builtin::Lowercase));

    let spelunker: Spelunker = Spelunker::from_config(&config);
    let mut signup = Signup {
        email: "  Ada@Example.COM ".into(),
        age: 9,
        untouched: "KEEP".into(),
    };
    spelunker.spelunk(&mut signup).unwrap();

    insta::assert_debug_snapshot!(signup, @r#"
    Signup {
        email: "ada@example.com",
        age: 13,
        untouched: "KEEP",
    }
    "#);
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "tag": "sanitize", "extra": true }"#);

    let err = SpelunkerConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, SpelunkError::Config(_)));
}

#[test]
fn test_bad_argument_from_config() {
    let config =
        SpelunkerConfig::from_json(r#"{ "tag": "sanitize", "handlers": { "at_least": "min" } }"#)
            .unwrap();
    let spelunker: Spelunker = Spelunker::from_config(&config);

    #[derive(Record, Default)]
    struct Broken {
        #[tags(sanitize = "at_least:many")]
        count: u8,
    }

    let err = spelunker.spelunk(&mut Broken::default()).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"Invalid argument in directive 'at_least:many': invalid digit found in string"
    );
}
