use clap::Parser;
use std::path::PathBuf;

/// automove: file a downloaded video into the best matching library folder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Video file to move
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Library root to search (defaults to TARGET_FOLDER from the config)
    #[arg(value_name = "TARGET_FOLDER")]
    pub target_folder: Option<PathBuf>,

    /// Config file to load instead of the default automove.conf locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log prompts and model replies
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_folder_is_optional() {
        let cli = Cli::try_parse_from(["automove", "/drop/movie.mp4"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("/drop/movie.mp4"));
        assert!(cli.target_folder.is_none());

        let cli = Cli::try_parse_from(["automove", "-v", "a.mkv", "/srv/videos"]).unwrap();
        assert_eq!(cli.target_folder, Some(PathBuf::from("/srv/videos")));
        assert!(cli.verbose);
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["automove"]).is_err());
    }
}
