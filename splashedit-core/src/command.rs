use std::path::PathBuf;

/// One operation selected from the command tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `default`
    RestoreDefault,
    /// `edit`
    ApplyEdited,
    /// `edit <path>`
    ApplyCustom(PathBuf),
    /// `admin`
    GrantPermissions,
}

impl Command {
    /// Matches the raw argument list literally.
    ///
    /// Every token counts, including switches such as `--no-log`. Unknown
    /// words, a wrong token count or an unexpected first token all give
    /// `None`, which callers treat as "do nothing".
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Option<Command> {
        match args {
            [only] => match only.as_ref() {
                "default" => Some(Command::RestoreDefault),
                "edit" => Some(Command::ApplyEdited),
                "admin" => Some(Command::GrantPermissions),
                _ => None,
            },
            [first, path] if first.as_ref() == "edit" => {
                Some(Command::ApplyCustom(PathBuf::from(path.as_ref())))
            }
            _ => None,
        }
    }
}
