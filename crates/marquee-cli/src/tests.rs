use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["marquee", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["marquee", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["marquee"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn movies_without_query_lists_popular() {
    let cli = Cli::try_parse_from(["marquee", "movies"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Movies { query: None })
    ));
}

#[test]
fn movies_accepts_a_quoted_query() {
    let cli = Cli::try_parse_from(["marquee", "movies", "the batman"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Movies { query: Some(ref q) }) if q == "the batman"
    ));
}

#[test]
fn trending_limit_is_optional() {
    let cli = Cli::try_parse_from(["marquee", "trending"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Trending { limit: None })
    ));

    let cli = Cli::try_parse_from(["marquee", "trending", "--limit", "10"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Trending { limit: Some(10) })
    ));
}

#[test]
fn trending_rejects_non_numeric_limit() {
    let result = Cli::try_parse_from(["marquee", "trending", "--limit", "many"]);
    assert!(result.is_err());
}

#[test]
fn parses_browse_command() {
    let cli = Cli::try_parse_from(["marquee", "browse"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Browse)));
}
