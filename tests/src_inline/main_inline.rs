use super::*;

#[test]
fn test_run_requires_db_and_out() {
    assert!(Cli::try_parse_from(["pcalf-report", "run", "--out", "r.html"]).is_err());
    assert!(Cli::try_parse_from(["pcalf-report", "run", "--db", "pcalf.db"]).is_err());
}

#[test]
fn test_run_defaults_template_dir() {
    let cli = Cli::try_parse_from(["pcalf-report", "run", "--db", "pcalf.db", "--out", "r.html"])
        .unwrap();
    let Command::Run(args) = cli.command;
    let request = RenderRequest::from(args);
    assert_eq!(request.db, PathBuf::from("pcalf.db"));
    assert_eq!(request.templates, PathBuf::from("templates"));
    assert_eq!(request.out, PathBuf::from("r.html"));
}

#[test]
fn test_run_reports_missing_database() {
    let dir = crate::input::fixtures::make_temp_dir();
    let cli = Cli::try_parse_from([
        "pcalf-report",
        "run",
        "--db",
        dir.join("absent.db").to_str().unwrap(),
        "--out",
        dir.join("r.html").to_str().unwrap(),
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert!(matches!(err, error::ReportError::Io(_)));
    assert!(!dir.join("r.html").exists());
}
