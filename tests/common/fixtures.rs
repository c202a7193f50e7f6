//! Predefined site layouts for the integration tests

#![allow(dead_code)]

use super::repository::*;
use pushy::core::error::Result;

pub fn page(title: &str) -> String {
    format!("---\ntitle: {title}\n---\n\nSome content\n")
}

/// A committed site with a blog page, a module, a plugin config and a theme
pub fn create_site_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "pages/01.blog/blog.md", &page("Blog"))?;
    create_file(&repo.path, "pages/01.home/_hero/hero.md", &page("Hero"))?;
    create_file(&repo.path, "pages/02.about/default.md", &page("About us"))?;
    create_file(&repo.path, "config/plugins/x.yaml", "enabled: true\n")?;
    create_file(&repo.path, "config/system.yaml", "home:\n  alias: /home\n")?;
    create_file(&repo.path, "themes/site/css/site.css", "body {}\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial site")?;

    Ok(repo)
}

/// The site with one change of every kind the admin panel shows
pub fn create_site_with_changes() -> Result<TestRepo> {
    let repo = create_site_repo()?;

    create_file(&repo.path, "pages/01.blog/blog.md", &page("Blog, updated"))?;
    create_file(&repo.path, "pages/01.home/_hero/hero.md", "---\ntitle: Hero\n---\n\nNew\n")?;
    create_file(&repo.path, "config/plugins/x.yaml", "enabled: false\n")?;
    create_file(&repo.path, "pages/03.news/images/photo.jpg", "jpeg")?;
    create_file(&repo.path, "themes/site/css/site.css", "body { margin: 0 }\n")?;

    Ok(repo)
}
