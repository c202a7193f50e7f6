use predicates::prelude::*;
use serde_json::json;

mod common;
use common::{assertions::*, fixtures::*, repository::*};

#[cfg(test)]
mod publish_items_command_tests {
    use super::*;

    fn publish(repo: &TestRepo, body: &serde_json::Value) -> anyhow::Result<std::process::Output> {
        Ok(repo
            .pushy()?
            .arg("publish-items")
            .write_stdin(body.to_string())
            .output()?)
    }

    #[test]
    fn test_publish_selection_as_one_commit() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        let before = commit_count(&repo.path)?;

        let output = publish(
            &repo,
            &json!({
                "items": [
                    {"path": "pages/01.blog/blog.md", "index": " ", "working": "M", "type": "page"},
                    {"path": "pages/03.news/images/photo.jpg", "index": "?"}
                ],
                "message": "Publish the blog"
            }),
        )?;

        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output),
            json!({"isSuccess": true, "alert": "Items have been published."})
        );
        assert_eq!(commit_count(&repo.path)?, before + 1);
        assert_eq!(
            last_commit(&repo.path)?,
            "Test User <test@example.com>|Publish the blog"
        );
        assert_eq!(
            last_commit_files(&repo.path)?,
            vec!["M pages/01.blog/blog.md", "A pages/03.news/images/photo.jpg"]
        );

        // Unselected changes stay pending
        let listing = repo.pushy()?.arg("read-items").output()?;
        assert_eq!(
            keys(&stdout_json(&listing)),
            vec!["config/plugins/x.yaml", "pages/01.home/_hero/hero.md"]
        );
        Ok(())
    }

    #[test]
    fn test_staged_changes_outside_the_selection_stay_uncommitted() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        git_add(&repo.path, "config/plugins/x.yaml")?;

        let output = publish(
            &repo,
            &json!({
                "items": [{"path": "pages/01.blog/blog.md", "index": " "}],
                "message": "Only the blog"
            }),
        )?;

        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["isSuccess"], true);
        assert_eq!(
            last_commit_files(&repo.path)?,
            vec!["M pages/01.blog/blog.md"]
        );

        let listing = stdout_json(&repo.pushy()?.arg("read-items").output()?);
        assert_eq!(listing["config/plugins/x.yaml"]["index"], "M");
        Ok(())
    }

    #[test]
    fn test_listing_posted_back_publishes_every_item() -> anyhow::Result<()> {
        let repo = create_site_repo()?;
        git_mv(&repo.path, "pages/02.about/default.md", "pages/02.team/default.md")?;
        create_file(&repo.path, "pages/04.café au lait/default.md", &page("Café"))?;

        let listing = stdout_json(&repo.pushy()?.arg("read-items").output()?);
        let items: Vec<serde_json::Value> = listing
            .as_object()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        assert_eq!(items.len(), 2);

        let output = publish(&repo, &json!({"items": items, "message": "Everything"}))?;

        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["alert"], "Items have been published.");
        assert_eq!(
            last_commit_files(&repo.path)?,
            vec![
                "R100 pages/02.about/default.md pages/02.team/default.md",
                r#"A "pages/04.caf\303\251 au lait/default.md""#,
            ]
        );

        repo.pushy()?
            .arg("read-items")
            .assert()
            .success()
            .stdout(predicate::str::diff("{}\n"));
        Ok(())
    }

    #[test]
    fn test_publish_rename_removes_old_and_adds_new() -> anyhow::Result<()> {
        let repo = create_site_repo()?;
        git_mv(&repo.path, "pages/02.about/default.md", "pages/02.team/default.md")?;

        let output = publish(
            &repo,
            &json!({
                "items": [{
                    "path": "pages/02.team/default.md",
                    "orig_path": "pages/02.about/default.md",
                    "index": "R"
                }],
                "message": "Rename about"
            }),
        )?;

        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["isSuccess"], true);
        assert_eq!(
            last_commit_files(&repo.path)?,
            vec!["R100 pages/02.about/default.md pages/02.team/default.md"]
        );
        Ok(())
    }

    #[test]
    fn test_publish_deleted_page() -> anyhow::Result<()> {
        let repo = create_site_repo()?;
        remove_file(&repo.path, "pages/02.about/default.md")?;

        let output = publish(
            &repo,
            &json!({
                "items": [{"path": "pages/02.about/default.md", "index": " ", "working": "D"}],
                "message": "Remove about"
            }),
        )?;

        assert!(output.status.success());
        assert_eq!(
            last_commit_files(&repo.path)?,
            vec!["D pages/02.about/default.md"]
        );
        Ok(())
    }

    #[test]
    fn test_publishing_again_has_nothing_to_publish() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        let body = json!({
            "items": [{"path": "config/plugins/x.yaml", "index": " "}],
            "message": "Disable x"
        });

        publish(&repo, &body)?;
        let after_first = commit_count(&repo.path)?;
        let output = publish(&repo, &body)?;

        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output),
            json!({"isSuccess": true, "alert": "There was nothing to publish."})
        );
        assert_eq!(commit_count(&repo.path)?, after_first);
        Ok(())
    }

    #[test]
    fn test_empty_selection_runs_nothing() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        let before = commit_count(&repo.path)?;

        let output = publish(&repo, &json!({"items": [], "message": "Nothing"}))?;

        assert!(output.status.success());
        assert_eq!(stdout_json(&output)["alert"], "There was nothing to publish.");
        assert_eq!(commit_count(&repo.path)?, before);
        Ok(())
    }

    #[test]
    fn test_author_flags_override_git_config() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;

        repo.pushy()?
            .args([
                "publish-items",
                "--author-name",
                "Jane Editor",
                "--author-email",
                "jane@example.com",
            ])
            .write_stdin(
                json!({
                    "items": [{"path": "config/plugins/x.yaml", "index": " "}],
                    "message": "Disable x"
                })
                .to_string(),
            )
            .assert()
            .success();

        assert_eq!(
            last_commit(&repo.path)?,
            "Jane Editor <jane@example.com>|Disable x"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_rejected() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        let before = commit_count(&repo.path)?;

        repo.pushy()?
            .arg("publish-items")
            .write_stdin("{\"items\": [")
            .assert()
            .failure()
            .stderr(invalid_request());

        assert_eq!(commit_count(&repo.path)?, before);
        Ok(())
    }

    #[test]
    fn test_blank_message_is_rejected() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;

        repo.pushy()?
            .arg("publish-items")
            .write_stdin(
                json!({
                    "items": [{"path": "config/plugins/x.yaml", "index": " "}],
                    "message": "  "
                })
                .to_string(),
            )
            .assert()
            .failure()
            .stderr(predicate::str::contains("A commit message is required"));
        Ok(())
    }

    #[test]
    fn test_failed_staging_reports_git_output() -> anyhow::Result<()> {
        let repo = create_site_with_changes()?;
        let before = commit_count(&repo.path)?;

        let output = publish(
            &repo,
            &json!({
                "items": [{"path": "../outside.md", "index": "?"}],
                "message": "Escape"
            }),
        )?;

        assert!(!output.status.success());
        let result = stdout_json(&output);
        assert_eq!(result["isSuccess"], false);
        assert!(result["alert"]
            .as_str()
            .is_some_and(|alert| alert.starts_with("There was an error publishing: \"")));
        assert_eq!(commit_count(&repo.path)?, before);
        Ok(())
    }
}
