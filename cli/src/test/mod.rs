#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    app_config::{AppConfig, DEFAULT_WEB_URL},
    args::{CliArgs, Command, ConfigArgs, OutputFormat},
    profile::{get_profile_path, Profile},
    utils::date_filter::DateFilter,
};


use test_context::TestContext;

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["vigia"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).unwrap().command.unwrap()
}

fn no_args() -> ConfigArgs {
    ConfigArgs {
        profile_path: None,
        api_url: None,
        web_url: None,
        token: None,
    }
}

#[test]
fn test_parse_create_collects_repeated_flags() {
    let Command::Create(create) = parse(&[
        "create",
        "João",
        "da",
        "Silva",
        "--variation",
        "Joãozinho",
        "--variation",
        "",
        "--not-contains",
        "arquivado",
        "--court",
        "tjsp,tjrj",
    ]) else {
        panic!("expected create");
    };

    assert_eq!(create.term, vec!["João", "da", "Silva"]);
    assert_eq!(create.variations, vec!["Joãozinho", ""]);
    assert_eq!(create.not_contains, vec!["arquivado"]);
    assert_eq!(create.courts, vec!["TJSP", "TJRJ"]);
    assert!(!create.interactive);
    assert_eq!(create.output, OutputFormat::Pretty);
}

#[test]
fn test_parse_rejects_unknown_court() {
    let result = CliArgs::try_parse_from(["vigia", "create", "Maria", "--court", "TRF1"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_list_date_filter() {
    let Command::List(list) = parse(&["list", "--date", "16/03/2024", "--output", "json"]) else {
        panic!("expected list");
    };

    assert_eq!(
        list.date,
        Some(DateFilter::Specific(
            NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
        ))
    );
    assert_eq!(list.output, OutputFormat::Json);
}

#[test]
fn test_parse_delete_and_open() {
    let Command::Delete(delete) = parse(&["delete", "42", "-y"]) else {
        panic!("expected delete");
    };
    assert_eq!(delete.id, 42);
    assert!(delete.yes);

    let Command::Open(open) = parse(&["open", "0001234-56.2024.8.26.0100", "--movements", "--print"])
    else {
        panic!("expected open");
    };
    assert_eq!(open.cnj, "0001234-56.2024.8.26.0100");
    assert!(open.movements);
    assert!(open.print);
}

#[test]
fn test_profile_path_resolution() {
    let explicit = get_profile_path(&Some("./work.toml".to_string()));
    assert_eq!(explicit, Path::new("./work.toml"));

    let named = get_profile_path(&Some("work".to_string()));
    assert!(named.ends_with(Path::new("profiles").join("work.toml")));
}

#[test]
fn test_config_defaults_without_profile() {
    let path = Path::new("/nonexistent/vigia/default.toml");
    let config = AppConfig::from_args(no_args(), path, None);

    assert!(!config.profile_exists);
    assert_eq!(config.web_url, DEFAULT_WEB_URL);
    assert_eq!(config.token_path, "/nonexistent/vigia/default.token");
    assert!(!config.token_configured);

    let err = config.resolve_token().unwrap_err();
    assert!(err.to_string().contains("vigia init"));
}

#[test]
fn test_config_precedence_args_over_profile() {
    let ctx = TestContext::new(&Profile {
        api_url: Some("https://profile.example/api".to_string()),
        web_url: Some("https://profile.example".to_string()),
        token_path: None,
        timeout_secs: Some(5),
    })
    .with_token("file-token\n");

    let args = ConfigArgs {
        api_url: Some("https://args.example/api".to_string()),
        ..no_args()
    };
    let config = AppConfig::from_args(args, &ctx.profile_path, ctx.profile().as_ref());

    assert!(config.profile_exists);
    assert_eq!(config.api_url, "https://args.example/api");
    assert_eq!(config.web_url, "https://profile.example");
    assert_eq!(config.timeout_secs, 5);
    assert!(config.token_configured);
    assert_eq!(config.resolve_token().unwrap(), "file-token");
}

#[test]
fn test_explicit_token_wins_over_token_file() {
    let ctx = TestContext::new(&Profile::default()).with_token("file-token");

    let args = ConfigArgs {
        token: Some("env-token".to_string()),
        ..no_args()
    };
    let config = AppConfig::from_args(args, &ctx.profile_path, ctx.profile().as_ref());

    assert_eq!(config.resolve_token().unwrap(), "env-token");

    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("env-token"));
    assert!(ctx.temp_dir.path().exists());
}
