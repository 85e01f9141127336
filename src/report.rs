//! Comparison report generation.
//!
//! Builds the report text that [`crate::format`] consumes from two saved
//! GitHub profile payloads (the `users/{name}` object plus the user's
//! repository list).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const TOP_LANGUAGES: usize = 5;
const TOP_PROJECTS: usize = 5;

/// Subset of the GitHub `users/{name}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Subset of one entry of the GitHub `users/{name}/repos` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A user and their repositories.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    pub user: GithubUser,
    #[serde(default)]
    pub repos: Vec<GithubRepo>,
}

impl ProfileData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotableProject {
    pub name: String,
    pub stars: u64,
    pub description: String,
    pub url: Option<String>,
}

/// Metrics derived from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub total_repos: usize,
    pub total_stars: u64,
    /// `(language, repository count)`, most used first.
    pub most_used_languages: Vec<(String, usize)>,
    pub notable_projects: Vec<NotableProject>,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
}

/// Payload of a profile comparison, as the comparison service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub comparison_text: String,
    #[serde(default)]
    pub user1: Option<ProfileSummary>,
    #[serde(default)]
    pub user2: Option<ProfileSummary>,
}

impl CompareResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Derive summary metrics from a profile.
pub fn analyze(profile: &ProfileData) -> ProfileSummary {
    let user = &profile.user;
    let repos = &profile.repos;

    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();

    // Count per language in order of first appearance so ties stay stable
    let mut most_used_languages: Vec<(String, usize)> = Vec::new();
    for language in repos.iter().filter_map(|r| non_empty(&r.language)) {
        match most_used_languages.iter_mut().find(|(l, _)| l == language) {
            Some((_, count)) => *count += 1,
            None => most_used_languages.push((language.to_string(), 1)),
        }
    }
    most_used_languages.sort_by(|a, b| b.1.cmp(&a.1));
    most_used_languages.truncate(TOP_LANGUAGES);

    let mut top: Vec<&GithubRepo> = repos.iter().collect();
    top.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    let notable_projects = top
        .into_iter()
        .take(TOP_PROJECTS)
        .map(|repo| NotableProject {
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            description: non_empty(&repo.description)
                .unwrap_or("No description")
                .to_string(),
            url: repo.html_url.clone(),
        })
        .collect();

    ProfileSummary {
        username: user.login.clone(),
        name: non_empty(&user.name).unwrap_or(&user.login).to_string(),
        bio: non_empty(&user.bio).unwrap_or("No bio").to_string(),
        followers: user.followers,
        following: user.following,
        total_repos: repos.len(),
        total_stars,
        most_used_languages,
        notable_projects,
        avatar_url: user.avatar_url.clone(),
        created_at: user.created_at.clone(),
    }
}

fn winner<'a, T: Ord>(
    a: &'a ProfileSummary,
    b: &'a ProfileSummary,
    key: impl Fn(&ProfileSummary) -> T,
) -> &'a str {
    match key(a).cmp(&key(b)) {
        std::cmp::Ordering::Greater => &a.name,
        std::cmp::Ordering::Less => &b.name,
        std::cmp::Ordering::Equal => "Tie",
    }
}

fn write_languages(out: &mut String, summary: &ProfileSummary) {
    if summary.most_used_languages.is_empty() {
        out.push_str("- No languages detected\n");
    }
    for (language, count) in &summary.most_used_languages {
        out.push_str(&format!("- {language}: {count} repositories\n"));
    }
}

fn write_projects(out: &mut String, summary: &ProfileSummary) {
    for project in &summary.notable_projects {
        out.push_str(&format!(
            "- **{}** ({} stars): {}\n",
            project.name, project.stars, project.description
        ));
    }
}

/// Render the comparison report for two summaries.
pub fn comparison_text(a: &ProfileSummary, b: &ProfileSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# GitHub Profile Comparison\n\n\
         ## {an} vs {bn}\n\n\
         ### Profile Overview\n\
         - **{an}**: {af} followers, {ag} following, {ar} repositories\n\
         - **{bn}**: {bf} followers, {bg} following, {br} repositories\n\n\
         ### Repository Count\n\
         - **{an}**: {ar} repositories\n\
         - **{bn}**: {br} repositories\n\
         - **Winner**: {repo_winner}\n\n\
         ### Total Stars\n\
         - **{an}**: {as_} stars\n\
         - **{bn}**: {bs} stars\n\
         - **Winner**: {star_winner}\n\n\
         ### Followers\n\
         - **{an}**: {af} followers\n\
         - **{bn}**: {bf} followers\n\
         - **Winner**: {follower_winner}\n\n\
         ### Most Used Languages\n\n\
         **{an}:**\n",
        an = a.name,
        bn = b.name,
        af = a.followers,
        bf = b.followers,
        ag = a.following,
        bg = b.following,
        ar = a.total_repos,
        br = b.total_repos,
        as_ = a.total_stars,
        bs = b.total_stars,
        repo_winner = winner(a, b, |s| s.total_repos),
        star_winner = winner(a, b, |s| s.total_stars),
        follower_winner = winner(a, b, |s| s.followers),
    ));
    write_languages(&mut out, a);
    out.push_str(&format!("\n**{}:**\n", b.name));
    write_languages(&mut out, b);

    out.push_str(&format!(
        "\n### Notable Projects\n\n**{}'s Top Projects:**\n",
        a.name
    ));
    write_projects(&mut out, a);
    out.push_str(&format!("\n**{}'s Top Projects:**\n", b.name));
    write_projects(&mut out, b);

    out.push_str(&format!(
        "\n### Bio\n- **{}**: {}\n- **{}**: {}\n",
        a.name, a.bio, b.name, b.bio
    ));

    out.trim().to_string()
}

/// Compare two profiles.
///
/// # Errors
///
/// Returns [`Error::SameUser`] when both profiles belong to the same login.
pub fn compare(first: &ProfileData, second: &ProfileData) -> Result<CompareResponse> {
    if first.user.login == second.user.login {
        return Err(Error::SameUser(first.user.login.clone()));
    }

    let user1 = analyze(first);
    let user2 = analyze(second);
    let comparison_text = comparison_text(&user1, &user2);
    debug!(
        "Compared {} and {} ({} bytes of report)",
        user1.username,
        user2.username,
        comparison_text.len()
    );

    Ok(CompareResponse {
        comparison_text,
        user1: Some(user1),
        user2: Some(user2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(name: &str, stars: u64, language: Option<&str>) -> GithubRepo {
        GithubRepo {
            name: name.to_string(),
            stargazers_count: stars,
            language: language.map(str::to_string),
            description: None,
            html_url: None,
        }
    }

    fn profile(login: &str, followers: u64, repos: Vec<GithubRepo>) -> ProfileData {
        ProfileData {
            user: GithubUser {
                login: login.to_string(),
                name: None,
                bio: None,
                followers,
                following: 1,
                avatar_url: None,
                created_at: None,
            },
            repos,
        }
    }

    #[test]
    fn analyze_counts_and_defaults() {
        let data = profile(
            "octo",
            10,
            vec![
                repo("a", 3, Some("Rust")),
                repo("b", 7, Some("Go")),
                repo("c", 1, Some("Rust")),
                repo("d", 0, None),
            ],
        );
        let summary = analyze(&data);

        assert_eq!(summary.name, "octo");
        assert_eq!(summary.bio, "No bio");
        assert_eq!(summary.total_repos, 4);
        assert_eq!(summary.total_stars, 11);
        assert_eq!(
            summary.most_used_languages,
            vec![("Rust".to_string(), 2), ("Go".to_string(), 1)]
        );
        let names: Vec<&str> = summary
            .notable_projects
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
        assert_eq!(summary.notable_projects[0].description, "No description");
    }

    #[test]
    fn analyze_keeps_first_seen_order_on_ties_and_truncates() {
        let repos = ["C", "B", "A", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, lang)| repo(&format!("r{i}"), 0, Some(lang)))
            .collect();
        let summary = analyze(&profile("octo", 0, repos));

        let languages: Vec<&str> = summary
            .most_used_languages
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(languages, vec!["C", "B", "A", "D", "E"]);
        let names: Vec<&str> = summary
            .notable_projects
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn empty_name_falls_back_to_login() {
        let mut data = profile("octo", 0, vec![]);
        data.user.name = Some(String::new());
        assert_eq!(analyze(&data).name, "octo");
    }

    #[test]
    fn report_layout() {
        let a = analyze(&profile("alice", 5, vec![repo("x", 2, Some("Rust"))]));
        let b = analyze(&profile("bob", 5, vec![]));
        let text = comparison_text(&a, &b);

        let expected = "# GitHub Profile Comparison

## alice vs bob

### Profile Overview
- **alice**: 5 followers, 1 following, 1 repositories
- **bob**: 5 followers, 1 following, 0 repositories

### Repository Count
- **alice**: 1 repositories
- **bob**: 0 repositories
- **Winner**: alice

### Total Stars
- **alice**: 2 stars
- **bob**: 0 stars
- **Winner**: alice

### Followers
- **alice**: 5 followers
- **bob**: 5 followers
- **Winner**: Tie

### Most Used Languages

**alice:**
- Rust: 1 repositories

**bob:**
- No languages detected

### Notable Projects

**alice's Top Projects:**
- **x** (2 stars): No description

**bob's Top Projects:**

### Bio
- **alice**: No bio
- **bob**: No bio";
        assert_eq!(text, expected);
    }

    #[test]
    fn compare_rejects_same_user() {
        let a = profile("octo", 0, vec![]);
        let err = compare(&a, &a.clone()).unwrap_err();
        assert!(matches!(err, Error::SameUser(login) if login == "octo"));
    }

    #[test]
    fn response_parses_backend_payload() {
        let json = r##"{
            "comparison_text": "# Title",
            "user1": {
                "username": "a", "name": "A", "bio": "No bio",
                "followers": 1, "following": 2, "total_repos": 0, "total_stars": 0,
                "most_used_languages": [["Rust", 3]],
                "notable_projects": [],
                "avatar_url": null, "created_at": null
            }
        }"##;
        let response = CompareResponse::from_json(json).unwrap();
        assert_eq!(response.comparison_text, "# Title");
        let user1 = response.user1.unwrap();
        assert_eq!(user1.most_used_languages, vec![("Rust".to_string(), 3)]);
        assert!(response.user2.is_none());
    }

    #[test]
    fn profile_from_json() {
        let json = r#"{"user": {"login": "octo", "followers": 3}, "repos": [{"name": "hello", "stargazers_count": 4}]}"#;
        let data = ProfileData::from_json(json).unwrap();
        assert_eq!(data.user.login, "octo");
        assert_eq!(data.repos[0].stargazers_count, 4);
    }

    #[test]
    fn profile_from_invalid_json() {
        assert!(matches!(
            ProfileData::from_json("{}"),
            Err(Error::Profile(_))
        ));
    }
}
