//! Skill taxonomy — the controlled vocabularies every extraction and
//! matching stage draws from.
//!
//! Two disjoint vocabularies exist: technical skills and soft skills.
//! Both are fixed at startup (built-in lists, optionally extended from a
//! JSON file) and shared read-only across requests via `Arc`.

pub mod matcher;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Built-in technical skill vocabulary. Canonical casing is what callers
/// get back regardless of the casing found in source text.
const TECH_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "JavaScript", "Java", "C++", "C#", "TypeScript", "Go", "Rust",
    "Ruby", "PHP", "Swift", "Kotlin", "R", "Scala", "Perl", "MATLAB", "C",
    // Web technologies
    "React", "Angular", "Vue.js", "Node.js", "Express.js", "Django", "Flask",
    "FastAPI", "Spring Boot", "ASP.NET", "HTML", "CSS", "SASS", "Bootstrap",
    "Tailwind CSS", "Next.js", "Nuxt.js", "Redux", "GraphQL", "REST API",
    // Databases
    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "Cassandra", "Oracle",
    "SQL Server", "DynamoDB", "Neo4j", "Elasticsearch", "Firebase",
    "Oracle SQL",
    // Cloud & DevOps
    "AWS", "Azure", "Google Cloud", "GCP", "Docker", "Kubernetes", "Jenkins",
    "CI/CD", "Terraform", "Ansible", "Git", "GitHub Actions", "GitLab CI",
    "CircleCI", "Prometheus", "Grafana", "ELK Stack", "Datadog",
    // Data science & ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Keras",
    "Scikit-learn", "Pandas", "NumPy", "Matplotlib", "Seaborn",
    "NLP", "Natural Language Processing", "Computer Vision", "Neural Networks",
    "XGBoost", "LightGBM", "BERT", "GPT", "Transformers",
    "EDA", "Exploratory Data Analysis", "Data Cleaning", "Data Visualization",
    "Statistics", "Statistical Analysis", "Probability", "Statistical Modeling",
    "Feature Engineering", "Model Deployment", "MLOps",
    // Audio / speech
    "Whisper", "Librosa", "Speech Recognition", "Audio Processing",
    // Big data
    "Apache Spark", "Hadoop", "Kafka", "Airflow", "Databricks", "Snowflake",
    // Development tools
    "VS Code", "Jupyter Notebook", "PyCharm", "IntelliJ IDEA", "Eclipse",
    "Cisco Packet Tracer", "Postman", "Swagger",
    // Operating systems
    "Linux", "Windows", "Ubuntu", "MacOS", "Unix",
    // Testing
    "Unit Testing", "Integration Testing", "Selenium", "Jest", "Pytest",
    "JUnit", "Cypress", "Test-Driven Development", "TDD",
    // Process & fundamentals
    "Agile", "Scrum", "JIRA", "Confluence", "OOP", "Data Structures",
    "Algorithms", "Design Patterns",
];

/// Built-in soft skill vocabulary.
const SOFT_SKILLS: &[&str] = &[
    "Communication", "Leadership", "Problem Solving", "Problem-Solving",
    "Teamwork", "Team Coordination", "Time Management", "Critical Thinking",
    "Adaptability", "Creativity", "Decision Making", "Collaboration",
    "Presentation Skills", "Interpersonal Skills", "Public Speaking",
    "Research Skills", "Research", "Negotiation", "Project Management",
    "Strategic Planning", "Mentoring", "Analytical Thinking", "Analytical Skills",
];

/// Shape of the optional vocabulary extension file
/// (`SKILL_VOCABULARY_PATH`). Both lists may be empty or absent.
#[derive(Debug, Default, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    technical_skills: Vec<String>,
    #[serde(default)]
    soft_skills: Vec<String>,
}

/// The controlled skill vocabulary. Entries keep insertion order so every
/// scan over the vocabulary is deterministic; a case-folded index backs
/// canonical-name lookup.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    technical: Vec<String>,
    soft: Vec<String>,
    index: HashMap<String, String>,
}

impl SkillVocabulary {
    /// Builds the vocabulary from the built-in lists only.
    pub fn builtin() -> Self {
        let mut vocab = Self {
            technical: Vec::new(),
            soft: Vec::new(),
            index: HashMap::new(),
        };
        for skill in TECH_SKILLS {
            vocab.push_technical(skill);
        }
        for skill in SOFT_SKILLS {
            vocab.push_soft(skill);
        }
        vocab
    }

    /// Builds the built-in vocabulary extended with entries from a JSON
    /// file. A missing or unreadable file is fatal: the caller is the
    /// startup path and an unloadable vocabulary leaves nothing to run on.
    pub fn builtin_extended_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading skill vocabulary file {}", path.display()))?;
        let file: VocabularyFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing skill vocabulary file {}", path.display()))?;

        let mut vocab = Self::builtin();
        for skill in &file.technical_skills {
            vocab.push_technical(skill);
        }
        for skill in &file.soft_skills {
            vocab.push_soft(skill);
        }
        Ok(vocab)
    }

    fn push_technical(&mut self, skill: &str) {
        let skill = skill.trim();
        if skill.is_empty() || self.index.contains_key(&skill.to_lowercase()) {
            return;
        }
        self.index.insert(skill.to_lowercase(), skill.to_string());
        self.technical.push(skill.to_string());
    }

    fn push_soft(&mut self, skill: &str) {
        let skill = skill.trim();
        if skill.is_empty() || self.index.contains_key(&skill.to_lowercase()) {
            return;
        }
        self.index.insert(skill.to_lowercase(), skill.to_string());
        self.soft.push(skill.to_string());
    }

    /// Technical skills in stable vocabulary order.
    pub fn technical(&self) -> &[String] {
        &self.technical
    }

    /// Soft skills in stable vocabulary order.
    pub fn soft(&self) -> &[String] {
        &self.soft
    }

    /// Canonical (original-case) name for a skill, looked up
    /// case-insensitively.
    pub fn canonical(&self, skill: &str) -> Option<&str> {
        self.index.get(&skill.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_both_vocabularies() {
        let vocab = SkillVocabulary::builtin();
        assert!(vocab.technical().len() > 100);
        assert!(vocab.soft().len() > 20);
    }

    #[test]
    fn test_vocabularies_are_disjoint() {
        let vocab = SkillVocabulary::builtin();
        for skill in vocab.technical() {
            assert!(
                !vocab.soft().contains(skill),
                "{skill} appears in both vocabularies"
            );
        }
    }

    #[test]
    fn test_canonical_lookup_is_case_insensitive() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.canonical("python"), Some("Python"));
        assert_eq!(vocab.canonical("PYTORCH"), Some("PyTorch"));
        assert_eq!(vocab.canonical("no-such-skill"), None);
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let a = SkillVocabulary::builtin();
        let b = SkillVocabulary::builtin();
        assert_eq!(a.technical(), b.technical());
        assert_eq!(a.technical()[0], "Python");
    }

    #[test]
    fn test_extension_file_merges_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        std::fs::write(
            &path,
            r#"{"technical_skills": ["Zig", "python"], "soft_skills": ["Patience"]}"#,
        )
        .unwrap();

        let base = SkillVocabulary::builtin();
        let vocab = SkillVocabulary::builtin_extended_from(&path).unwrap();
        assert_eq!(vocab.canonical("zig"), Some("Zig"));
        assert_eq!(vocab.canonical("patience"), Some("Patience"));
        // "python" already exists with canonical casing; no duplicate added.
        assert_eq!(vocab.technical().len(), base.technical().len() + 1);
    }

    #[test]
    fn test_extension_file_missing_is_an_error() {
        let result = SkillVocabulary::builtin_extended_from(Path::new("/does/not/exist.json"));
        assert!(result.is_err());
    }
}
