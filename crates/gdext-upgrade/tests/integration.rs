//! Integration tests for gdext-upgrade
//!
//! `git` and `scons` are replaced by `true`/`false` through the settings
//! file so the binary can run against a scratch project without network
//! access.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use which::which;

const MANIFEST: &str = "[configuration]\n\
    entry_symbol = \"myplugin_library_init\"\n\
    compatibility_minimum = \"4.5\"\n\
    reloadable = true\n\
    \n\
    [libraries]\n\
    linux.debug.x86_64 = \"res://bin/libmyplugin.linux.template_debug.x86_64.so\"\n";

struct Harness {
    _home: TempDir,
    project: TempDir,
    config_path: PathBuf,
    log_dir: PathBuf,
}

impl Harness {
    /// Scratch project plus a settings file pointing git and scons at the
    /// given stub programs
    fn new(git: &Path, scons: &Path) -> io::Result<Self> {
        let home = TempDir::new()?;
        let project = TempDir::new()?;

        let config_path = home.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                "git-path = \"{}\"\nscons-path = \"{}\"\n",
                git.display(),
                scons.display()
            ),
        )?;
        let log_dir = home.path().join("logs");

        let root = project.path();
        fs::write(
            root.join(".gitmodules"),
            "[submodule \"godot-cpp\"]\n\tpath = godot-cpp\n\turl = https://github.com/godotengine/godot-cpp.git\n\tbranch = 4.5\n",
        )?;
        fs::write(root.join("dont_touch.txt"), "myplugin\n4.5\n")?;
        fs::create_dir_all(root.join("myplugin"))?;
        fs::write(root.join("myplugin").join("myplugin.gdextension"), MANIFEST)?;

        Ok(Self {
            _home: home,
            project,
            config_path,
            log_dir,
        })
    }

    fn root(&self) -> &Path {
        self.project.path()
    }

    fn mark_submodule_initialized(&self) -> io::Result<()> {
        fs::create_dir_all(self.root().join("godot-cpp"))?;
        fs::write(
            self.root().join("godot-cpp").join(".git"),
            "gitdir: ../.git/modules/godot-cpp\n",
        )
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("gdext-upgrade");
        cmd.env("GDEXT_UPGRADE_CONFIG", &self.config_path)
            .env("GDEXT_UPGRADE_LOG_DIR", &self.log_dir)
            .env_remove("RUST_LOG");
        cmd
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap_or_default()
    }
}

fn stub(program: &str) -> Option<PathBuf> {
    which(program).ok()
}

#[test]
fn test_version() {
    cargo_bin_cmd!("gdext-upgrade")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gdext-upgrade"));
}

#[test]
fn test_help() {
    cargo_bin_cmd!("gdext-upgrade")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-clean"))
        .stdout(predicate::str::contains("--min"));
}

#[test]
fn test_invalid_root_exits_with_1() {
    let Ok(home) = TempDir::new() else {
        return;
    };
    cargo_bin_cmd!("gdext-upgrade")
        .env("GDEXT_UPGRADE_CONFIG", home.path().join("missing.toml"))
        .env("GDEXT_UPGRADE_LOG_DIR", home.path())
        .arg(home.path().join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("plugin root not found"));
}

#[test]
fn test_end_to_end_upgrade() {
    let (Some(git), Some(scons)) = (stub("true"), stub("true")) else {
        return;
    };
    let Ok(env) = Harness::new(&git, &scons) else {
        return;
    };
    let Ok(()) = env.mark_submodule_initialized() else {
        return;
    };

    env.command()
        .arg(env.root())
        .args(["--min", "4.6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compatibility_minimum will be set to: 4.6"))
        .stdout(predicate::str::contains("Done!"));

    assert_eq!(env.read("dont_touch.txt"), "myplugin\n4.6\n");
    assert_eq!(
        env.read("myplugin/myplugin.gdextension"),
        MANIFEST.replace("compatibility_minimum = \"4.5\"", "compatibility_minimum = \"4.6\"")
    );
    assert!(env.read(".gitmodules").contains("\tbranch = master\n"));
}

#[test]
fn test_failed_submodule_init_exits_with_1() {
    let (Some(git), Some(scons)) = (stub("false"), stub("true")) else {
        return;
    };
    let Ok(env) = Harness::new(&git, &scons) else {
        return;
    };

    env.command()
        .arg(env.root())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("submodule initialisation failed"));

    assert_eq!(env.read("dont_touch.txt"), "myplugin\n4.5\n");
}

#[test]
fn test_failed_clean_only_warns() {
    let (Some(git), Some(scons)) = (stub("true"), stub("false")) else {
        return;
    };
    let Ok(env) = Harness::new(&git, &scons) else {
        return;
    };
    let Ok(()) = env.mark_submodule_initialized() else {
        return;
    };

    env.command()
        .arg(env.root())
        .assert()
        .success()
        .stderr(predicate::str::contains("non-zero exit code"));
}

#[test]
fn test_no_clean_with_missing_scons_succeeds() {
    let Some(git) = stub("true") else {
        return;
    };
    let Ok(env) = Harness::new(&git, Path::new("/nonexistent/scons")) else {
        return;
    };
    let Ok(()) = env.mark_submodule_initialized() else {
        return;
    };

    env.command()
        .arg(env.root())
        .arg("--no-clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean build files: no"))
        .stderr(predicate::str::contains("scons").not());
}

#[test]
fn test_quiet_suppresses_banner_and_summary() {
    let (Some(git), Some(scons)) = (stub("true"), stub("true")) else {
        return;
    };
    let Ok(env) = Harness::new(&git, &scons) else {
        return;
    };
    let Ok(()) = env.mark_submodule_initialized() else {
        return;
    };

    env.command()
        .arg(env.root())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("Upgrading plugin at").not())
        .stdout(predicate::str::contains("Done").not());

    assert_eq!(env.read("dont_touch.txt"), "myplugin\n4.6\n");
}

#[test]
fn test_unknown_flag_is_treated_as_root() {
    let Ok(home) = TempDir::new() else {
        return;
    };
    cargo_bin_cmd!("gdext-upgrade")
        .env("GDEXT_UPGRADE_CONFIG", home.path().join("missing.toml"))
        .env("GDEXT_UPGRADE_LOG_DIR", home.path())
        .current_dir(home.path())
        .args(["--force", "--min"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("plugin root not found"));
}
