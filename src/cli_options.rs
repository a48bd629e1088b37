use std::collections::HashMap;
use std::path::PathBuf;

pub struct CliOptions {
    pub use_multi_thread: bool,
    pub perspective: bool,
    pub size: usize,
    pub uv_size: usize,
    pub output_dir: PathBuf,
    pub show_help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            use_multi_thread: true,
            perspective: false,
            size: 256,
            uv_size: 128,
            output_dir: PathBuf::from("."),
            show_help: false,
        }
    }
}

impl CliOptions {
    pub fn message() -> &'static str {
        r#"
        --use_multi_thread | --use_single_thread
        --perspective | --orthographic
        --size <pixels>
        --uv_size <pixels>
        --output <dir>
        --help
        "#
    }
}

fn parse_size(key: &str, value: Option<String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", key))?;
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Invalid value {} for {}", value, key)),
    }
}

pub fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut pairs: HashMap<String, Option<String>> = HashMap::new();
    let mut args = args.into_iter().rev().collect::<Vec<_>>();
    args.pop(); // Removes args[0]

    while let Some(key) = args.pop() {
        if !key.starts_with('-') {
            return Err(format!("Unrecognized key {}", key));
        }
        match args.last() {
            None => {
                pairs.insert(key, None);
            }
            Some(value) => {
                if value.starts_with('-') {
                    pairs.insert(key, None);
                } else {
                    let value = args.pop();
                    pairs.insert(key, value);
                }
            }
        }
    }
    let mut options = CliOptions::default();
    for (k, v) in pairs.into_iter() {
        match k.as_str() {
            "--use_multi_thread" => options.use_multi_thread = true,
            "--use_single_thread" => options.use_multi_thread = false,
            "--perspective" => options.perspective = true,
            "--orthographic" => options.perspective = false,
            "--size" => options.size = parse_size(&k, v)?,
            "--uv_size" => options.uv_size = parse_size(&k, v)?,
            "--output" => match v {
                Some(dir) => options.output_dir = PathBuf::from(dir),
                None => return Err(format!("Missing value for {}", k)),
            },
            "--help" => options.show_help = true,
            _ => return Err(format!("Unrecognized key {}", k)),
        }
    }
    Ok(options)
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("mesh-render")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_and_flags() {
        let options = parse_args(args(&[])).unwrap();
        assert!(options.use_multi_thread);
        assert!(!options.perspective);

        let options = parse_args(args(&[
            "--use_single_thread",
            "--perspective",
            "--size",
            "64",
            "--output",
            "/tmp/out",
        ]))
        .unwrap();
        assert!(!options.use_multi_thread);
        assert!(options.perspective);
        assert_eq!(options.size, 64);
        assert_eq!(options.uv_size, 128);
        assert_eq!(options.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn bad_arguments() {
        assert!(parse_args(args(&["size"])).is_err());
        assert!(parse_args(args(&["--size", "0"])).is_err());
        assert!(parse_args(args(&["--size"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }
}
