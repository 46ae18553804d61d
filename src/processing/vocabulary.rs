//! Built-in keyword vocabularies
//!
//! These are defaults only. Callers and the config file can replace or extend
//! any of them; nothing here is read ambiently by the scoring functions.

use crate::processing::keyword_matcher::WeightedKeyword;

pub const TECH_SKILLS: &[&str] = &[
    // Programming languages
    "rust", "python", "javascript", "typescript", "java", "c++", "c#", "golang", "ruby",
    "php", "swift", "kotlin", "scala", "haskell", "matlab",
    // Web
    "react", "vue", "angular", "svelte", "html", "css", "tailwind", "webpack", "node.js",
    "express", "nextjs",
    // Backend and infrastructure
    "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "ansible", "jenkins",
    "ci/cd", "devops", "microservices", "rest", "graphql", "grpc", "redis",
    "elasticsearch", "nginx",
    // Databases
    "postgresql", "mysql", "mongodb", "cassandra", "dynamodb", "sqlite",
    // Data and ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "pandas", "numpy",
    "spark", "hadoop", "kafka", "airflow",
    // Testing
    "jest", "pytest", "junit", "selenium", "cypress", "tdd",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "critical thinking",
    "adaptability", "time management", "project management", "collaboration",
    "mentoring", "presentation", "negotiation", "stakeholder management",
];

pub const ROLE_KEYWORDS: &[&str] = &[
    "software engineer", "developer", "architect", "full stack", "frontend", "backend",
    "data scientist", "ml engineer", "product manager", "designer", "analyst",
    "consultant",
];

pub const TOOLING: &[&str] = &[
    "agile", "scrum", "kanban", "jira", "confluence", "git", "linux", "bash",
];

pub const SECTION_HEADINGS: &[&str] = &[
    "experience", "education", "skills", "summary", "projects", "certifications",
];

pub const STRONG_VERBS: &[&str] = &[
    "led", "built", "designed", "launched", "delivered", "improved", "reduced",
    "increased", "optimized", "automated", "architected", "implemented", "spearheaded",
    "streamlined", "mentored", "negotiated", "drove", "scaled", "migrated", "created",
];

pub const ARCHITECTURE_TERMS: &[&str] = &[
    "architecture", "microservice", "monolith", "component", "service", "api",
    "database", "schema", "layer", "interface", "event", "queue",
];

pub const SCALABILITY_TERMS: &[&str] = &[
    "scale", "scalab", "shard", "partition", "cache", "load balanc", "horizontal",
    "throughput", "replica", "cdn", "concurren",
];

pub const RELIABILITY_TERMS: &[&str] = &[
    "reliab", "failover", "redundan", "retry", "monitor", "alert", "backup",
    "availability", "fault", "circuit breaker", "recovery", "idempoten",
];

pub const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "complexity", "data structure", "performance", "memory", "thread",
    "test", "debug", "latency", "protocol", "compile", "deploy",
];

pub const PROJECT_TERMS: &[&str] = &[
    "project", "deliver", "deadline", "stakeholder", "requirement", "launch", "result",
    "team", "impact", "metric", "milestone", "scope",
];

pub const BEHAVIORAL_TERMS: &[&str] = &[
    "situation", "task", "action", "result", "learned", "conflict", "feedback",
    "collaborat", "communicat", "challenge", "decision", "responsib",
];

pub const GENERAL_TERMS: &[&str] = &[
    "experience", "because", "example", "result", "goal", "approach", "improve",
    "learn", "team", "role",
];

pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "like", "basically", "actually", "literally", "kinda", "sorta",
];

pub const HEDGE_PHRASES: &[&str] = &[
    "maybe", "probably", "i think", "i guess", "sort of", "kind of", "not sure",
    "perhaps", "i believe",
];

/// Convert a static term list into case-insensitive keywords.
pub fn keywords(terms: &[&str]) -> Vec<WeightedKeyword> {
    terms.iter().map(|t| WeightedKeyword::new(*t)).collect()
}

/// Full skill database used to derive job keywords from a description.
pub fn skill_database(extra: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = TECH_SKILLS
        .iter()
        .chain(SOFT_SKILLS)
        .chain(ROLE_KEYWORDS)
        .chain(TOOLING)
        .map(|s| s.to_string())
        .collect();

    skills.extend(extra.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()));

    let mut seen = std::collections::HashSet::new();
    skills.retain(|s| seen.insert(s.to_lowercase()));
    skills
}
