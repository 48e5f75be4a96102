use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_records_args() {
    let cli = Cli::try_parse_from([
        "rq", "-p", "shop", "records", "--table", "orders", "--limit", "5", "--order-by", "id",
        "--desc",
    ])
    .unwrap();
    assert_eq!(cli.global.project_dir, "shop");
    let Commands::Records(args) = cli.command else {
        panic!("expected records");
    };
    assert_eq!(args.relation.table, "orders");
    assert_eq!(args.limit, Some(5));
    assert!(args.desc);
    assert!(!args.relation.no_preview);
}

#[test]
fn test_desc_requires_order_by() {
    assert!(Cli::try_parse_from(["rq", "records", "--table", "orders", "--desc"]).is_err());
}

#[test]
fn test_parse_preview_mode() {
    let cli =
        Cli::try_parse_from(["rq", "preview", "-t", "orders", "-m", "explicit", "-r", "2,3"])
            .unwrap();
    let Commands::Preview(args) = cli.command else {
        panic!("expected preview");
    };
    assert_eq!(args.mode, Some(PreviewModeArg::Explicit));
    assert_eq!(args.restrict.as_deref(), Some("2,3"));
}
