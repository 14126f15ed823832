//! Company data assembly for the JSON API
//!
//! The payload is derived from two plain-text files in the project's data
//! directory. A missing file yields empty fields; only an actual read
//! failure is an error.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Problem statement source file
pub const PROBLEM_STATEMENT_FILE: &str = "Problem statement.txt";

/// Link collection source file
pub const LINKS_FILE: &str = "links.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub role: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub total_addressable_market: String,
    pub serviceable_addressable_market: String,
    pub serviceable_obtainable_market: String,
}

impl Default for MarketData {
    fn default() -> Self {
        Self {
            total_addressable_market: "$500M".to_string(),
            serviceable_addressable_market: "$200M".to_string(),
            serviceable_obtainable_market: "$15M".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benefits {
    pub cost_reduction: String,
    pub energy_reduction: String,
    pub carbon_reduction: String,
}

impl Default for Benefits {
    fn default() -> Self {
        Self {
            cost_reduction: "70%".to_string(),
            energy_reduction: "80%".to_string(),
            carbon_reduction: "90%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyData {
    pub problem_statement: String,
    pub achievements: Vec<Achievement>,
    pub team_members: Vec<TeamMember>,
    pub market_data: MarketData,
    pub benefits: Benefits,
}

/// Assemble the company data payload from the data directory
pub fn load(data_dir: &Path) -> io::Result<CompanyData> {
    let problem_statement = read_optional(&data_dir.join(PROBLEM_STATEMENT_FILE))?;
    let links = read_optional(&data_dir.join(LINKS_FILE))?;

    let mut achievements = Vec::new();
    let mut team_members = Vec::new();
    for line in links.lines() {
        if line.contains("innovatumsciencepark.se") {
            achievements.push(Achievement {
                title: "Winner - Startup Challenge".to_string(),
                description: "Won the Startup Challenge with AI-based delivery robots"
                    .to_string(),
                url: line.trim().to_string(),
            });
        } else if line.contains("linkedin.com/in/") && line.contains("Founder") {
            if let Some(url) = line.split_whitespace().next() {
                team_members.push(TeamMember {
                    role: "Founder".to_string(),
                    url: url.to_string(),
                });
            }
        }
    }

    Ok(CompanyData {
        problem_statement,
        achievements,
        team_members,
        market_data: MarketData::default(),
        benefits: Benefits::default(),
    })
}

fn read_optional(path: &Path) -> io::Result<String> {
    if path.exists() {
        std::fs::read_to_string(path)
    } else {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_absent_files_is_empty() {
        let temp = TempDir::new().unwrap();
        let data = load(temp.path()).unwrap();
        assert!(data.problem_statement.is_empty());
        assert!(data.achievements.is_empty());
        assert!(data.team_members.is_empty());
        assert_eq!(data.market_data.total_addressable_market, "$500M");
        assert_eq!(data.benefits.carbon_reduction, "90%");
    }

    #[test]
    fn test_load_scans_links_for_achievements_and_team() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(PROBLEM_STATEMENT_FILE), "Deliveries are slow.").unwrap();
        std::fs::write(
            temp.path().join(LINKS_FILE),
            "https://www.innovatumsciencepark.se/startup-challenge\n\
             https://linkedin.com/in/jane-doe Founder and CEO\n\
             https://example.com/unrelated\n",
        )
        .unwrap();

        let data = load(temp.path()).unwrap();
        assert_eq!(data.problem_statement, "Deliveries are slow.");
        assert_eq!(data.achievements.len(), 1);
        assert!(data.achievements[0].url.contains("innovatumsciencepark.se"));
        assert_eq!(data.team_members.len(), 1);
        assert_eq!(data.team_members[0].role, "Founder");
        assert_eq!(data.team_members[0].url, "https://linkedin.com/in/jane-doe");
    }

    #[test]
    fn test_linkedin_line_without_founder_marker_is_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(LINKS_FILE),
            "https://linkedin.com/in/someone Engineer\n",
        )
        .unwrap();

        let data = load(temp.path()).unwrap();
        assert!(data.team_members.is_empty());
    }
}
