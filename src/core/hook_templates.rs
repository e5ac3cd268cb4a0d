//! Compiled-in hook templates and per-language tool tables.
//!
//! Everything here is an immutable static. [`HOOK_CATALOG`] bundles both
//! tables and is handed by reference to the hook installer and the hooks
//! menu.

/// A named tool and the shell command that runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub key: &'static str,
    pub command: &'static str,
}

impl Tool {
    /// Executable probed with `command -v` before the tool runs.
    pub fn binary(&self) -> &'static str {
        self.command.split_whitespace().next().unwrap_or(self.key)
    }
}

#[derive(Debug)]
pub struct LanguageTools {
    pub key: &'static str,
    pub name: &'static str,
    pub linters: &'static [Tool],
    pub formatters: &'static [Tool],
    pub test_runners: &'static [Tool],
    pub build_commands: &'static [&'static str],
    /// `*.ext` matches any top-level file with that extension, anything
    /// else must exist by exact name.
    pub detection: &'static [&'static str],
}

/// Which generator renders a configurable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Linting,
    Formatting,
    Tests,
    Build,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBody {
    Static(&'static str),
    Generated(Generator),
}

#[derive(Debug)]
pub struct HookTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub body: TemplateBody,
}

impl HookTemplate {
    pub fn requires_config(&self) -> bool {
        matches!(self.body, TemplateBody::Generated(_))
    }
}

#[derive(Debug)]
pub struct HookType {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub templates: &'static [HookTemplate],
}

impl HookType {
    pub fn template(&self, key: &str) -> Option<&HookTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }
}

#[derive(Debug)]
pub struct HookCatalog {
    pub hook_types: &'static [HookType],
    pub languages: &'static [LanguageTools],
}

impl HookCatalog {
    pub fn hook_type(&self, key: &str) -> Option<&HookType> {
        self.hook_types.iter().find(|h| h.key == key)
    }

    pub fn language(&self, key: &str) -> Option<&LanguageTools> {
        self.languages.iter().find(|l| l.key == key)
    }

    pub fn language_keys(&self) -> Vec<&'static str> {
        self.languages.iter().map(|l| l.key).collect()
    }
}

const fn tool(key: &'static str, command: &'static str) -> Tool {
    Tool { key, command }
}

pub static LANGUAGES: &[LanguageTools] = &[
    LanguageTools {
        key: "python",
        name: "Python",
        linters: &[
            tool("ruff", "ruff check ."),
            tool("flake8", "flake8 ."),
            tool("pylint", "pylint **/*.py"),
            tool("mypy", "mypy ."),
        ],
        formatters: &[
            tool("ruff", "ruff format ."),
            tool("black", "black ."),
            tool("autopep8", "autopep8 --in-place --recursive ."),
        ],
        test_runners: &[
            tool("pytest", "pytest"),
            tool("unittest", "python -m unittest discover"),
        ],
        build_commands: &["python -m compileall -q .", "python -m build"],
        detection: &["*.py", "setup.py", "pyproject.toml", "requirements.txt"],
    },
    LanguageTools {
        key: "javascript",
        name: "JavaScript/TypeScript",
        linters: &[
            tool("eslint", "eslint ."),
            tool("tslint", "tslint -c tslint.json '**/*.ts'"),
        ],
        formatters: &[
            tool("prettier", "prettier --write ."),
            tool("eslint-fix", "eslint --fix ."),
        ],
        test_runners: &[
            tool("jest", "jest"),
            tool("npm-test", "npm test"),
            tool("vitest", "vitest run"),
        ],
        build_commands: &["npm run build", "tsc --noEmit"],
        detection: &["*.js", "*.ts", "package.json", "tsconfig.json"],
    },
    LanguageTools {
        key: "go",
        name: "Go",
        linters: &[
            tool("golint", "golint ./..."),
            tool("go-vet", "go vet ./..."),
            tool("staticcheck", "staticcheck ./..."),
        ],
        formatters: &[tool("gofmt", "gofmt -w ."), tool("goimports", "goimports -w .")],
        test_runners: &[tool("go-test", "go test ./...")],
        build_commands: &["go build ./..."],
        detection: &["*.go", "go.mod"],
    },
    LanguageTools {
        key: "rust",
        name: "Rust",
        linters: &[tool("clippy", "cargo clippy -- -D warnings")],
        formatters: &[tool("rustfmt", "cargo fmt")],
        test_runners: &[tool("cargo-test", "cargo test")],
        build_commands: &["cargo build", "cargo build --release"],
        detection: &["*.rs", "Cargo.toml"],
    },
    LanguageTools {
        key: "ruby",
        name: "Ruby",
        linters: &[tool("rubocop", "rubocop")],
        formatters: &[tool("rubocop-fix", "rubocop -a")],
        test_runners: &[
            tool("rspec", "rspec"),
            tool("minitest", "ruby -Itest test/**/*_test.rb"),
        ],
        build_commands: &["bundle exec rake build"],
        detection: &["*.rb", "Gemfile"],
    },
];

const NO_DEBUG_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Block Debug Code Pre-commit Hook

echo "Checking for debug statements..."

if git diff --cached | grep -E "(console\.log|debugger|pdb\.set_trace|import pdb|binding\.pry)" >/dev/null 2>&1; then
    echo "Debug statements found in staged files!"
    echo "Please remove debug code before committing."
    exit 1
fi

echo "No debug statements found."
"#;

const PROTECT_MAIN_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Protect Main Branch Pre-push Hook

current_branch=$(git symbolic-ref HEAD | sed -e 's,.*/\(.*\),\1,')

if [ "$current_branch" = "main" ] || [ "$current_branch" = "master" ]; then
    echo "Direct push to $current_branch is not allowed!"
    echo "Please create a feature branch and submit a pull request."
    exit 1
fi

echo "Branch check passed."
"#;

const CONVENTIONAL_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Conventional Commits Hook

commit_msg_file=$1
commit_msg=$(cat "$commit_msg_file")

if ! echo "$commit_msg" | grep -qE "^(feat|fix|docs|style|refactor|test|chore|perf|ci|build|revert)(\(.+\))?: .{1,}"; then
    echo "Invalid commit message format!"
    echo ""
    echo "Commit message must follow Conventional Commits format:"
    echo "  type(scope): description"
    echo ""
    echo "Types: feat, fix, docs, style, refactor, test, chore, perf, ci, build, revert"
    echo ""
    echo "Examples:"
    echo "  feat(auth): add login functionality"
    echo "  fix(api): resolve null pointer exception"
    echo "  docs: update README"
    exit 1
fi

echo "Commit message format valid."
"#;

const MIN_LENGTH_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Minimum Message Length Hook

commit_msg_file=$1
commit_msg=$(cat "$commit_msg_file")

min_length=10

if [ ${#commit_msg} -lt $min_length ]; then
    echo "Commit message too short!"
    echo "Minimum length: $min_length characters"
    echo "Current length: ${#commit_msg} characters"
    exit 1
fi

echo "Commit message length valid."
"#;

const NO_WIP_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Block WIP Commits Hook

commit_msg_file=$1
commit_msg=$(cat "$commit_msg_file")

if echo "$commit_msg" | grep -qiE "^(wip|work in progress)"; then
    echo "WIP commits are not allowed!"
    echo "Please complete your work before committing."
    exit 1
fi

echo "Commit message valid."
"#;

const NOTIFY_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Post-commit Notification Hook

commit_msg=$(git log -1 --pretty=%B)
commit_hash=$(git log -1 --pretty=%h)

echo "Commit $commit_hash created."

if command -v osascript >/dev/null 2>&1; then
    osascript -e "display notification \"$commit_msg\" with title \"Commit Successful\""
fi

if command -v notify-send >/dev/null 2>&1; then
    notify-send "Commit Successful" "$commit_msg"
fi
"#;

const BACKUP_SCRIPT: &str = r#"#!/bin/sh
# GitCLI: Auto Backup Post-commit Hook

backup_dir="../.git-backups"
timestamp=$(date +%Y%m%d_%H%M%S)
repo_name=$(basename "$(git rev-parse --show-toplevel)")

mkdir -p "$backup_dir"

echo "Creating backup..."
git bundle create "$backup_dir/${repo_name}_${timestamp}.bundle" --all

echo "Backup created: ${repo_name}_${timestamp}.bundle"
"#;

const fn template(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    body: TemplateBody,
) -> HookTemplate {
    HookTemplate {
        key,
        name,
        description,
        body,
    }
}

use Generator::*;
use TemplateBody::{Generated, Static};

pub static HOOK_TYPES: &[HookType] = &[
    HookType {
        key: "pre-commit",
        name: "Pre-commit Hook",
        description: "Runs before each commit",
        templates: &[
            template("linting", "Code Linting", "Run linters before commit", Generated(Linting)),
            template("formatting", "Auto-format Code", "Auto-format code before commit", Generated(Formatting)),
            template("tests", "Run Tests", "Run test suite before commit", Generated(Tests)),
            template("no-debug", "Block Debug Code", "Prevent commits with debug statements", Static(NO_DEBUG_SCRIPT)),
            template("custom", "Custom Commands", "Run your own custom commands", Generated(Custom)),
        ],
    },
    HookType {
        key: "pre-push",
        name: "Pre-push Hook",
        description: "Runs before pushing to remote",
        templates: &[
            template("tests", "Run Full Test Suite", "Run all tests before push", Generated(Tests)),
            template("protect-main", "Protect Main Branch", "Prevent direct pushes to main/master", Static(PROTECT_MAIN_SCRIPT)),
            template("build", "Build Before Push", "Ensure project builds successfully", Generated(Build)),
            template("custom", "Custom Commands", "Run your own custom commands", Generated(Custom)),
        ],
    },
    HookType {
        key: "commit-msg",
        name: "Commit Message Hook",
        description: "Validates commit message format",
        templates: &[
            template("conventional", "Conventional Commits", "Enforce conventional commit format", Static(CONVENTIONAL_SCRIPT)),
            template("min-length", "Minimum Message Length", "Require minimum commit message length", Static(MIN_LENGTH_SCRIPT)),
            template("no-wip", "Block WIP Commits", "Prevent commits with WIP in message", Static(NO_WIP_SCRIPT)),
        ],
    },
    HookType {
        key: "post-commit",
        name: "Post-commit Hook",
        description: "Runs after each commit",
        templates: &[
            template("notify", "Commit Notification", "Send notification after commit", Static(NOTIFY_SCRIPT)),
            template("backup", "Auto Backup", "Create backup after commit", Static(BACKUP_SCRIPT)),
        ],
    },
];

pub static HOOK_CATALOG: HookCatalog = HookCatalog {
    hook_types: HOOK_TYPES,
    languages: LANGUAGES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let pre_push = HOOK_CATALOG.hook_type("pre-push").unwrap();
        assert!(pre_push.template("protect-main").is_some());
        assert!(pre_push.template("no-debug").is_none());
        assert!(HOOK_CATALOG.hook_type("post-merge").is_none());
        assert_eq!(HOOK_CATALOG.language("rust").unwrap().name, "Rust");
    }

    #[test]
    fn test_static_scripts_have_shebang() {
        for hook in HOOK_CATALOG.hook_types {
            for template in hook.templates {
                if let TemplateBody::Static(script) = template.body {
                    assert!(script.starts_with("#!/bin/sh\n"), "{}", template.key);
                    assert!(script.contains("# GitCLI:"), "{}", template.key);
                }
            }
        }
    }

    #[test]
    fn test_tool_binary_is_first_word() {
        let go = HOOK_CATALOG.language("go").unwrap();
        assert_eq!(go.linters[1].binary(), "go");
        assert_eq!(LANGUAGES[0].test_runners[0].binary(), "pytest");
    }

    #[test]
    fn test_configurable_templates_require_config() {
        let pre_commit = HOOK_CATALOG.hook_type("pre-commit").unwrap();
        assert!(pre_commit.template("linting").unwrap().requires_config());
        assert!(!pre_commit.template("no-debug").unwrap().requires_config());
    }
}
