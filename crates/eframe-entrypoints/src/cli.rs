use clap::Parser;

/// Parses the process command line into `T`.
///
/// Android launches the activity without arguments, so this yields the defaults there.
pub fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}

/// Parses `T` from an explicit argument list (first item is the program name).
pub fn parse_args_from<T, I, S>(args: I) -> Result<T, clap::Error>
where
    T: Parser,
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    T::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Demo {
        #[clap(long, default_value = "1.0")]
        wait_seconds: f64,
    }

    #[test]
    fn test_parse_args_from_defaults() {
        let demo: Demo = parse_args_from(["demo"]).unwrap();
        assert_eq!(demo.wait_seconds, 1.0);
    }

    #[test]
    fn test_parse_args_from_error() {
        assert!(parse_args_from::<Demo, _, _>(["demo", "--wait-seconds", "soon"]).is_err());
    }
}
