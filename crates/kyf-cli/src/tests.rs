use kyf_core::{
    AttemptPhase, Banner, BoardView, CommunityFeedSnapshot, Enrichment, FollowerCount, Interest,
    SocialProfileSnapshot,
};

use super::*;
use crate::submit::{build_form, render_view};

fn parse_submit(extra: &[&str]) -> SubmitArgs {
    let mut argv = vec![
        "kyf",
        "submit",
        "--name",
        "Ana",
        "--email",
        "ana@example.com",
        "--cpf",
        "123.456.789-09",
    ];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).expect("expected valid cli args").command {
        Commands::Submit(args) => args,
        other => panic!("expected submit, got: {other:?}"),
    }
}

#[test]
fn parses_submit_with_required_fields() {
    let args = parse_submit(&[]);
    assert_eq!(args.name, "Ana");
    assert_eq!(args.cpf, "123.456.789-09");
    assert!(args.twitter.is_none());
    assert!(args.interests.is_empty());
    assert!(args.file.is_none());
}

#[test]
fn submit_requires_cpf() {
    let result = Cli::try_parse_from(["kyf", "submit", "--name", "Ana", "--email", "a@b.c"]);
    assert!(result.is_err());
}

#[test]
fn parses_repeated_interests() {
    let args = parse_submit(&["--interest", "cs-go", "--interest", "Eventos presenciais"]);
    assert_eq!(
        args.interests,
        vec![Interest::CsGo, Interest::EventosPresenciais]
    );
}

#[test]
fn rejects_unknown_interest() {
    let result = Cli::try_parse_from([
        "kyf",
        "submit",
        "--name",
        "Ana",
        "--email",
        "a@b.c",
        "--cpf",
        "12345678909",
        "--interest",
        "valorant",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_mask_cpf_command() {
    let cli = Cli::try_parse_from(["kyf", "mask-cpf", "12345"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::MaskCpf { ref input } if input == "12345"));
}

#[test]
fn parses_ping_command() {
    let cli = Cli::try_parse_from(["kyf", "ping"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Ping));
}

#[test]
fn cpf_helpers() {
    assert_eq!(cpf::run_mask("12345"), "123.45");
    assert_eq!(cpf::run_check("123.456.789-09").unwrap(), "12345678909");
    assert!(cpf::run_check("123.456.78").is_err());
}

#[test]
fn build_form_selects_each_interest_once() {
    let args = parse_submit(&["--interest", "furia", "--interest", "furia"]);
    let form = build_form(&args, None).unwrap();
    assert_eq!(form.interests().selected(), vec![Interest::Furia]);
}

#[test]
fn build_form_produces_valid_profile() {
    let args = parse_submit(&["--twitter", "@ana", "--address", "Rua A"]);
    let profile = build_form(&args, None).unwrap().submit().unwrap();
    assert_eq!(profile.cpf.as_str(), "12345678909");
    assert_eq!(profile.twitter_handle.as_deref(), Some("@ana"));
    assert_eq!(profile.address.as_deref(), Some("Rua A"));
    assert!(profile.activities.is_none());
}

#[test]
fn build_form_rejects_cpf_with_extra_digits() {
    let mut args = parse_submit(&[]);
    args.cpf = "123456789012".to_owned();
    let err = build_form(&args, None).unwrap_err();
    assert_eq!(err, kyf_core::CoreError::InvalidCpf { digits: 12 });
    assert!(cpf::run_check(&args.cpf).is_err());
}

#[test]
fn build_form_rejects_short_cpf() {
    let mut args = parse_submit(&[]);
    args.cpf = "123.456.789-0".to_owned();
    assert!(matches!(
        build_form(&args, None),
        Err(kyf_core::CoreError::InvalidCpf { digits: 10 })
    ));
}

#[test]
fn render_shows_banner_profile_and_feed() {
    let view = BoardView {
        attempt: None,
        phase: AttemptPhase::Done,
        banner: Some(Banner::Success("Dados enviados!".to_owned())),
        social: Some(Enrichment::Placeholder {
            value: SocialProfileSnapshot::placeholder("@team"),
            cause: "HTTP 500".to_owned(),
        }),
        feed: Some(Enrichment::Loaded(CommunityFeedSnapshot {
            recent_posts: vec!["a".to_owned(), "b".to_owned()],
        })),
    };
    let out = render_view(&view);
    assert!(out.starts_with("Dados enviados!\n"), "got:\n{out}");
    assert!(out.contains("@team\nSeguidores: N/A\n"), "got:\n{out}");
    assert!(out.contains("Em destaque do #FURIA\n  - a\n  - b\n"), "got:\n{out}");
}

#[test]
fn render_hides_empty_sections() {
    let view = BoardView {
        banner: Some(Banner::Success("ok".to_owned())),
        social: Some(Enrichment::Loaded(SocialProfileSnapshot {
            display_name: "team".to_owned(),
            follower_count: FollowerCount::Count(10),
            recent_posts: vec![],
        })),
        feed: Some(Enrichment::Loaded(CommunityFeedSnapshot::default())),
        ..BoardView::default()
    };
    assert_eq!(render_view(&view), "ok\n");
}
