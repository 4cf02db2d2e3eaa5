//! @ai:module:intent Make file references reported by a build portable across machines
//! @ai:module:layer domain
//! @ai:module:public_api normalize, non_blank, NormalizedPaths
//! @ai:module:stateless true
//!
//! Containment in the working directory is a raw string-prefix test. Paths are
//! never canonicalized: `..` segments, case differences and symlinks are
//! compared as written.

/// Both separator forms are recognized regardless of the host platform.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// @ai:intent Project display name and portable file path for one diagnostic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPaths {
    pub module_name: Option<String>,
    pub file_name: Option<String>,
}

/// @ai:intent Treat empty and whitespace-only strings as absent
/// @ai:example (Some("  ")) -> None
/// @ai:example (Some("a")) -> Some("a")
/// @ai:effects pure
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// @ai:intent Derive module name and working-directory-relative file path
/// @ai:pre working_dir is the directory captured once at process start
/// @ai:post file_name is unchanged unless it starts with working_dir
/// @ai:post a file equal to working_dir itself yields no file_name
/// @ai:assumes a blank working_dir disables relativization instead of matching every path as a prefix
/// @ai:example ("/build", Some("/build/src/App.csproj"), Some("/build/src/App/Main.cs")) -> (App.csproj, src/App/Main.cs)
/// @ai:example ("/build", Some("/build/App.csproj"), Some("/other/Main.cs")) -> (App.csproj, /other/Main.cs)
/// @ai:effects pure
pub fn normalize(
    working_dir: &str,
    project_path: Option<&str>,
    file_path: Option<&str>,
) -> NormalizedPaths {
    let project_path = non_blank(project_path);
    let file_path = non_blank(file_path);

    let (Some(project_path), Some(file_path)) = (project_path, file_path) else {
        return NormalizedPaths {
            module_name: project_path.map(str::to_string),
            file_name: file_path.map(str::to_string),
        };
    };

    NormalizedPaths {
        module_name: non_blank(Some(file_name_component(project_path))).map(str::to_string),
        file_name: non_blank(Some(relative_to(working_dir, file_path))).map(str::to_string),
    }
}

/// @ai:intent Last path component, with any directory prefix discarded
/// @ai:effects pure
fn file_name_component(path: &str) -> &str {
    path.rsplit(SEPARATORS).next().unwrap_or(path)
}

/// @ai:intent Strip working_dir from the front of path when it is a literal prefix
/// @ai:effects pure
fn relative_to<'a>(working_dir: &str, path: &'a str) -> &'a str {
    if working_dir.trim().is_empty() {
        return path;
    }

    match path.strip_prefix(working_dir) {
        Some(rest) => rest.trim_start_matches(SEPARATORS),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(module: Option<&str>, file: Option<&str>) -> NormalizedPaths {
        NormalizedPaths {
            module_name: module.map(str::to_string),
            file_name: file.map(str::to_string),
        }
    }

    #[test]
    fn test_file_inside_working_dir_is_relativized() {
        let paths = normalize(
            "/build",
            Some("/build/src/App.csproj"),
            Some("/build/src/App/Main.cs"),
        );

        assert_eq!(paths, owned(Some("App.csproj"), Some("src/App/Main.cs")));
    }

    #[test]
    fn test_file_outside_working_dir_is_verbatim() {
        let paths = normalize("/build", Some("/build/src/App.csproj"), Some("/other/Main.cs"));

        assert_eq!(paths.file_name.as_deref(), Some("/other/Main.cs"));
    }

    #[test]
    fn test_missing_project_returns_inputs_unchanged() {
        let paths = normalize("/build", None, Some("/build/src/Main.cs"));
        assert_eq!(paths, owned(None, Some("/build/src/Main.cs")));

        let paths = normalize("/build", Some("  "), Some("/build/src/Main.cs"));
        assert_eq!(paths, owned(None, Some("/build/src/Main.cs")));
    }

    #[test]
    fn test_missing_file_returns_project_path_unchanged() {
        let paths = normalize("/build", Some("/build/src/App.csproj"), Some(""));

        assert_eq!(paths, owned(Some("/build/src/App.csproj"), None));
    }

    #[test]
    fn test_module_name_drops_every_directory_level() {
        for project in [
            "App.csproj",
            "src/App.csproj",
            "/a/b/c/d/e/App.csproj",
            r"C:\work\src\App.csproj",
        ] {
            let paths = normalize("/build", Some(project), Some("x.cs"));
            assert_eq!(paths.module_name.as_deref(), Some("App.csproj"), "{project}");
        }
    }

    #[test]
    fn test_leading_separators_of_both_forms_are_trimmed() {
        let paths = normalize(r"C:\build", Some("App.csproj"), Some(r"C:\build\/src\Main.cs"));

        assert_eq!(paths.file_name.as_deref(), Some(r"src\Main.cs"));
    }

    #[test]
    fn test_prefix_check_is_raw_string_comparison() {
        // "/build-tools" starts with "/build" even though it is a sibling directory.
        let paths = normalize("/build", Some("App.csproj"), Some("/build-tools/gen.cs"));
        assert_eq!(paths.file_name.as_deref(), Some("-tools/gen.cs"));

        let paths = normalize("/build", Some("App.csproj"), Some("/BUILD/src/Main.cs"));
        assert_eq!(paths.file_name.as_deref(), Some("/BUILD/src/Main.cs"));

        let paths = normalize("/build", Some("App.csproj"), Some("/build/../x/Main.cs"));
        assert_eq!(paths.file_name.as_deref(), Some("../x/Main.cs"));
    }

    #[test]
    fn test_blank_working_dir_leaves_paths_alone() {
        let paths = normalize("", Some("App.csproj"), Some("/src/Main.cs"));

        assert_eq!(paths.file_name.as_deref(), Some("/src/Main.cs"));
    }

    #[test]
    fn test_file_equal_to_working_dir_is_absent() {
        let paths = normalize("/build", Some("/build/App.csproj"), Some("/build"));
        assert_eq!(paths, owned(Some("App.csproj"), None));

        let paths = normalize("/build", Some("/build/App.csproj"), Some("/build//"));
        assert_eq!(paths.file_name, None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some(" \t\n")), None);
        assert_eq!(non_blank(Some(" a ")), Some(" a "));
    }
}
