use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "recipe-api", version, about = "Recipe management backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create a staff superuser and exit.
    CreateSuperuser {
        #[arg(long, env = "SUPERUSER_EMAIL")]
        email: String,
        #[arg(long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["recipe-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_create_superuser() {
        let cli = Cli::try_parse_from([
            "recipe-api",
            "create-superuser",
            "--email",
            "admin@dushdesh.com",
            "--password",
            "admin123",
        ])
        .unwrap();
        match cli.command {
            Some(Command::CreateSuperuser { email, password }) => {
                assert_eq!(email, "admin@dushdesh.com");
                assert_eq!(password, "admin123");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
