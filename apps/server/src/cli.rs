use clap::{ArgAction, Args, Parser, Subcommand};
use search_core::{FileType, SearchMode, SearchRequest};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsearch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the document service on the unix socket
    Serve,
    /// Store and index one or more files
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Search the library
    Search(SearchArgs),
    /// List stored documents
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one document in full
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a document and its stored file
    Delete { id: String },
    /// Document count per file type
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,

    /// all, title, author, publisher, content or keywords
    #[arg(short, long, default_value_t = SearchMode::All)]
    pub mode: SearchMode,

    /// Anchored field matching, no approximate fallback
    #[arg(long)]
    pub exact: bool,

    /// Split the query on ` AND ` / ` OR `
    #[arg(short, long)]
    pub boolean: bool,

    #[arg(long, value_parser = parse_file_type)]
    pub file_type: Option<FileType>,

    /// Earliest upload date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Latest upload date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub date_to: Option<String>,

    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn to_request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(self.query.clone())
            .mode(self.mode)
            .fuzzy(!self.exact)
            .boolean(self.boolean);

        if let Some(file_type) = self.file_type {
            request = request.filter("fileType", file_type.as_str());
        }
        if let Some(date) = &self.date_from {
            request = request.filter("dateFrom", date.clone());
        }
        if let Some(date) = &self.date_to {
            request = request.filter("dateTo", date.clone());
        }
        request
    }
}

fn parse_file_type(s: &str) -> Result<FileType, String> {
    match s.to_ascii_lowercase().as_str() {
        "pdf" => Ok(FileType::Pdf),
        "docx" => Ok(FileType::Docx),
        "txt" => Ok(FileType::Txt),
        "unknown" => Ok(FileType::Unknown),
        _ => Err(format!("unknown file type '{s}', expected pdf, docx, txt or unknown")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn search_args(args: &[&str]) -> SearchArgs {
        let argv = ["docsearch", "search"].into_iter().chain(args.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Search(args)) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_defaults() {
        let request = search_args(&["wombat"]).to_request();
        assert_eq!(request.query, "wombat");
        assert_eq!(request.search_mode, SearchMode::All);
        assert!(request.fuzzy);
        assert!(!request.boolean_mode);
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_search_flags() {
        let request = search_args(&[
            "a AND b",
            "--mode",
            "Title",
            "--exact",
            "--boolean",
            "--file-type",
            "docx",
            "--date-from",
            "2024-01-01",
            "--date-to",
            "2024-12-31",
        ])
        .to_request();

        assert_eq!(request.search_mode, SearchMode::Title);
        assert!(!request.fuzzy);
        assert!(request.boolean_mode);
        assert_eq!(request.filters.get("fileType").map(String::as_str), Some("DOCX"));
        assert_eq!(request.filters.get("dateFrom").map(String::as_str), Some("2024-01-01"));
        assert_eq!(request.filters.get("dateTo").map(String::as_str), Some("2024-12-31"));
    }

    #[rstest]
    #[case("PDF", FileType::Pdf)]
    #[case("txt", FileType::Txt)]
    #[case("Unknown", FileType::Unknown)]
    fn test_parse_file_type(#[case] input: &str, #[case] expected: FileType) {
        assert_eq!(parse_file_type(input), Ok(expected));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_file_type("odt").is_err());
        assert!(Cli::try_parse_from(["docsearch", "search", "x", "--mode", "body"]).is_err());
        assert!(Cli::try_parse_from(["docsearch", "ingest"]).is_err());
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["docsearch", "stats", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
