use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    playlist: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    juke::app::run(juke::app::AppStartupOptions {
        playlist: args.playlist,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--playlist" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--playlist requires a file path");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--playlist cannot be empty");
                }
                out.playlist = Some(PathBuf::from(value.trim()));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("JukeTUI");
    println!("  --playlist <file>   Play tracks from a playlist JSON file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_flag_takes_a_path() {
        let args = parse_args(vec![
            String::from("--playlist"),
            String::from("mix.json"),
        ])
        .expect("parse");
        assert_eq!(args.playlist, Some(PathBuf::from("mix.json")));
    }

    #[test]
    fn missing_playlist_value_is_rejected() {
        assert!(parse_args(vec![String::from("--playlist")]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_args(vec![String::from("--wat")]).is_err());
    }
}
