use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn cmd() -> assert_cmd::Command {
    cargo_bin_cmd!("tfhunter")
}

/// 在临时目录中运行 `tfhunter scan`
fn scan_cmd(dir: &Path) -> assert_cmd::Command {
    let mut c = cmd();
    c.current_dir(dir).arg("scan");
    c
}

fn write_tf(dir: &Path, name: &str, body: &str) {
    let p = dir.join(name);
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(p, body).unwrap();
}

const COMMENTED_RESOURCE: &str = r#"
# resource "aws_instance" "example" {
#   ami           = "ami-123456"
#   instance_type = "t2.micro"
# }
"#;

const CLEAN: &str = r#"
resource "aws_instance" "example" {
  ami           = "ami-123456"
  instance_type = "t2.micro"
}
"#;

mod detection {
    use super::*;

    #[test]
    fn test_detects_commented_resource() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "main.tf", COMMENTED_RESOURCE);

        scan_cmd(dir.path())
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("main.tf:2: Commented-out Terraform code detected"))
            .stdout(predicate::str::contains("main.tf:2: Commented-out Terraform block detected (lines 2-5)."))
            .stdout(predicate::str::contains("❌ Commented-out Terraform code found."));
    }

    #[test]
    fn test_allows_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "main.tf", CLEAN);

        scan_cmd(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Commented-out Terraform code detected").not())
            .stdout(predicate::str::contains("✅ No commented-out Terraform code found."));
    }

    #[test]
    fn test_detects_commented_assignment() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "vars.tf", "\n# ami = \"ami-123456\"\n# name = \"example\"\n");

        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("vars.tf:2: Commented-out Terraform code detected: # ami = \"ami-123456\""))
            .stdout(predicate::str::contains("vars.tf:3:"));
    }

    #[test]
    fn test_detects_commented_line_inside_live_block() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(
            dir.path(),
            "main.tf",
            "resource \"aws_instance\" \"example\" {\n  ami = \"ami-123456\"\n  # instance_type = \"t2.micro\"\n}\n",
        );

        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("main.tf:3: Commented-out Terraform code detected"));
    }

    #[test]
    fn test_detects_multiline_block_comment() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(
            dir.path(),
            "main.tf",
            "\n/*\nresource \"aws_instance\" \"example\" {\n  ami = \"ami-123456\"\n}\n*/\n",
        );

        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "main.tf:2: Commented-out Terraform code detected in /* ... */ block comment.",
            ));
    }

    #[test]
    fn test_walks_subdirectories_and_skips_dot_terraform() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "modules/net/main.tf", COMMENTED_RESOURCE);
        write_tf(dir.path(), ".terraform/modules/cache/main.tf", COMMENTED_RESOURCE);

        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("modules/net/main.tf:2:"))
            .stdout(predicate::str::contains(".terraform").not());
    }
}

mod options {
    use super::*;

    #[test]
    fn test_explicit_file_arguments() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "dirty.tf", COMMENTED_RESOURCE);
        write_tf(dir.path(), "clean.tf", CLEAN);

        scan_cmd(dir.path()).arg("clean.tf").assert().success();
        scan_cmd(dir.path()).arg("clean.tf").arg("dirty.tf").assert().code(1);
    }

    #[test]
    fn test_json_format() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "main.tf", COMMENTED_RESOURCE);

        let output = scan_cmd(dir.path()).args(["--format", "json", "--collapse"]).output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["kind"], "block");
        assert_eq!(arr[0]["file"], "main.tf");
        assert_eq!(arr[0]["start_line"], 2);
        assert_eq!(arr[0]["end_line"], 5);
    }

    #[test]
    fn test_config_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "legacy.hcl", COMMENTED_RESOURCE);

        scan_cmd(dir.path()).assert().success();

        fs::write(dir.path().join(".tfhunter.toml"), "extensions = [\"hcl\"]\n").unwrap();
        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("legacy.hcl:2:"));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "main.tf", CLEAN);
        fs::write(dir.path().join(".tfhunter.toml"), "unknown_key = 1\n").unwrap();

        scan_cmd(dir.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("load config"));
    }

    #[test]
    fn test_unreadable_file_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.tf"), [0xff, 0xfe, b'\n']).unwrap();
        write_tf(dir.path(), "main.tf", COMMENTED_RESOURCE);

        scan_cmd(dir.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("main.tf:2:"))
            .stderr(predicate::str::contains("not valid UTF-8"));
    }

    #[test]
    fn test_output_file() {
        let dir = tempfile::tempdir().unwrap();
        write_tf(dir.path(), "main.tf", COMMENTED_RESOURCE);

        scan_cmd(dir.path()).args(["--output", "report.txt"]).assert().code(1).stdout("");
        let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
        assert!(report.contains("main.tf:2: Commented-out Terraform block detected"));
    }
}
