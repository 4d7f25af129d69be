//! Git commit-msg hook: installation and message rewriting.
//!
//! `install` symlinks `.git/hooks/commit-msg` to a shim under `~/.sprintly`
//! that delegates back to `sprintly hook run`, so upgrading the binary never
//! requires reinstalling hooks.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use git2::Repository;
use regex::Regex;
use sprintly_api::ConfigStore;

/// Name of the hook we manage.
const HOOK_NAME: &str = "commit-msg";

/// Shell shim installed at `~/.sprintly/commit-msg`.
const HOOK_SCRIPT: &str = "#!/bin/sh\nexec sprintly hook run \"$1\"\n";

/// A tracker keyword followed by an item number marks the message as already
/// referencing an item.
static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(close[sd]?|fix(e[sd])?|addresses|re|refs?|references|see|breaks|unfixes|re-?opens?)\b\s+#\d+",
    )
    .unwrap()
});

/// Leading `#<number>` shortcut at the start of a message.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\d+\b").unwrap());

/// Install the commit-msg hook into the current repository.
pub fn install() -> Result<()> {
    let store = ConfigStore::open_default().context("Failed to open ~/.sprintly")?;
    let repo = Repository::discover(".")
        .context("This command can only be run inside a git repository")?;
    let hooks_dir = repo.path().join("hooks");
    fs::create_dir_all(&hooks_dir).context("Failed to create hooks directory")?;

    write_hook_script(&store)?;

    let destination = hooks_dir.join(HOOK_NAME);
    back_up_existing(&destination)?;
    symlink(&store.hook_path(), &destination)?;
    println!("Hook was installed at {}", destination.display());

    warn_on_email_mismatch(&repo, &store);
    Ok(())
}

/// Remove the commit-msg hook from the current repository.
///
/// Only removes a symlink; a regular file was not installed by this tool and
/// is left alone.
pub fn uninstall() -> Result<()> {
    let repo = Repository::discover(".")
        .context("This command can only be run inside a git repository")?;
    let destination = repo.path().join("hooks").join(HOOK_NAME);

    if destination.is_symlink() {
        fs::remove_file(&destination).context("Failed to remove hook symlink")?;
        println!("Hook has been uninstalled.");
    } else if destination.is_file() {
        bail!("The commit-msg hook was not installed by this tool. Please remove it manually.");
    } else {
        println!("Hook is already uninstalled.");
    }
    Ok(())
}

/// Rewrite a commit message so it references a work item.
///
/// Messages already carrying a keyword and item number pass through
/// untouched; a leading `#<n>` shortcut gets `References` prepended;
/// otherwise the user is asked for an item number, and an empty answer
/// leaves the message alone.
pub fn run(message_file: &Path) -> Result<()> {
    let message = fs::read_to_string(message_file)
        .with_context(|| format!("Failed to read {}", message_file.display()))?;

    let rewritten = match classify(&message) {
        MessageAction::Keep => return Ok(()),
        MessageAction::PrependReferences => format!("References {}", message.trim_start()),
        MessageAction::Prompt => {
            let Some(number) = prompt_item_number() else {
                return Ok(());
            };
            format!("{} References #{number}.\n", message.trim_end())
        }
    };

    fs::write(message_file, rewritten)
        .with_context(|| format!("Failed to write {}", message_file.display()))
}

/// Outcome of inspecting a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageAction {
    /// Already references an item.
    Keep,
    /// Leading `#<n>` shortcut: prepend `References`.
    PrependReferences,
    /// No reference found: ask for an item number.
    Prompt,
}

fn classify(message: &str) -> MessageAction {
    if KEYWORD.is_match(message) {
        MessageAction::Keep
    } else if LEADING_NUMBER.is_match(message.trim_start()) {
        MessageAction::PrependReferences
    } else {
        MessageAction::Prompt
    }
}

/// Ask for an item number; `None` when the answer is empty, not a number, or
/// no terminal is attached (a hook can run non-interactively).
fn prompt_item_number() -> Option<u64> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Sprint.ly item number (empty to skip)")
        .allow_empty(true)
        .interact_text()
        .ok()?;
    answer.trim().trim_start_matches('#').parse().ok()
}

fn write_hook_script(store: &ConfigStore) -> Result<()> {
    let path = store.hook_path();
    fs::write(&path, HOOK_SCRIPT)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

/// A regular file at the destination is preserved as `<name>.original`; a
/// stale symlink is removed.
fn back_up_existing(destination: &Path) -> Result<()> {
    if destination.is_symlink() {
        fs::remove_file(destination).context("Failed to remove existing hook symlink")?;
    } else if destination.is_file() {
        let backup = destination.with_extension("original");
        fs::rename(destination, &backup).with_context(|| {
            format!("File already exists at {}", destination.display())
        })?;
        println!("Existing hook preserved at {}", backup.display());
    }
    Ok(())
}

#[cfg(unix)]
fn symlink(source: &Path, destination: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, destination).context("Unable to create symlink")
}

#[cfg(not(unix))]
fn symlink(_source: &Path, _destination: &Path) -> Result<()> {
    bail!("Hook installation requires symlink support")
}

/// Sprint.ly matches commit comments to users by email; warn when the git
/// identity won't line up.
fn warn_on_email_mismatch(repo: &Repository, store: &ConfigStore) {
    let configured = store.load_config().ok().flatten().map(|c| c.user);
    let git_email = repo
        .config()
        .and_then(|config| config.get_string("user.email"))
        .ok();

    if let (Some(user), Some(email)) = (configured, git_email)
        && user != email
    {
        println!(
            "{}",
            style(format!(
                "WARNING: your git email ({email}) does not match your Sprint.ly username ({user})"
            ))
            .yellow()
        );
        println!("Fix with: git config user.email {user}");
    }
}
