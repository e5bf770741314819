//! Built-in role tables.
//!
//! Entries are lowercase unless they are matched exactly (acronym roles).

/// Curated role names for systems-engineering, acquisition and program documents.
pub(crate) const KNOWN_ROLES: &[&str] = &[
    "systems engineer",
    "lead systems engineer",
    "chief engineer",
    "chief systems engineer",
    "program manager",
    "project manager",
    "deputy program manager",
    "deputy project manager",
    "contracting officer",
    "contracting officer's representative",
    "contract specialist",
    "quality assurance manager",
    "quality assurance engineer",
    "quality engineer",
    "configuration manager",
    "configuration management lead",
    "data manager",
    "risk manager",
    "logistics manager",
    "test engineer",
    "test director",
    "test manager",
    "test conductor",
    "safety engineer",
    "system safety engineer",
    "safety manager",
    "reliability engineer",
    "software engineer",
    "software lead",
    "software manager",
    "hardware engineer",
    "design engineer",
    "integration engineer",
    "requirements engineer",
    "verification engineer",
    "security engineer",
    "information system security officer",
    "information system security manager",
    "authorizing official",
    "technical authority",
    "engineering technical authority",
    "mission director",
    "mission manager",
    "flight director",
    "principal investigator",
    "project scientist",
    "subject matter expert",
    "technical monitor",
    "technical lead",
    "integrated product team lead",
    "product owner",
    "scrum master",
    "configuration control board",
    "engineering review board",
    "change control board",
    "technical review board",
    "integrated product team",
    "program office",
    "project office",
    "review board",
    "prime contractor",
    "subcontractor",
    "contractor",
    "government",
    "customer",
    "supplier",
    "stakeholder",
    "independent verification and validation agent",
    "operations manager",
    "facility manager",
    "site manager",
    "procurement officer",
    "financial manager",
    "business manager",
    "resource analyst",
    "cost analyst",
    "systems architect",
    "software architect",
    "chief architect",
    "release manager",
    "maintenance engineer",
    "field engineer",
];

/// Alias → canonical display name.
///
/// Keys are lowercase surface forms; values are the display names the
/// canonicalizer emits.
pub(crate) const ROLE_ALIASES: &[(&str, &str)] = &[
    ("system engineer", "Systems Engineer"),
    ("sys engineer", "Systems Engineer"),
    ("systems engineers", "Systems Engineer"),
    ("system engineers", "Systems Engineer"),
    ("program managers", "Program Manager"),
    ("project managers", "Project Manager"),
    ("pm", "Program Manager"),
    ("contracting officers", "Contracting Officer"),
    ("co", "Contracting Officer"),
    ("cor", "Contracting Officer's Representative"),
    ("contracting officer representative", "Contracting Officer's Representative"),
    ("contracting officers representative", "Contracting Officer's Representative"),
    ("qa manager", "Quality Assurance Manager"),
    ("qa engineer", "Quality Assurance Engineer"),
    ("cm lead", "Configuration Management Lead"),
    ("ccb", "Configuration Control Board"),
    ("erb", "Engineering Review Board"),
    ("ipt", "Integrated Product Team"),
    ("ipt lead", "Integrated Product Team Lead"),
    ("pi", "Principal Investigator"),
    ("sme", "Subject Matter Expert"),
    ("smes", "Subject Matter Expert"),
    ("subject matter experts", "Subject Matter Expert"),
    ("isso", "Information System Security Officer"),
    ("issm", "Information System Security Manager"),
    ("ao", "Authorizing Official"),
    ("iv&v agent", "Independent Verification and Validation Agent"),
    ("lead systems engineers", "Lead Systems Engineer"),
    ("test engineers", "Test Engineer"),
    ("safety engineers", "Safety Engineer"),
    ("software engineers", "Software Engineer"),
    ("contractors", "Contractor"),
    ("subcontractors", "Subcontractor"),
    ("suppliers", "Supplier"),
    ("stakeholders", "Stakeholder"),
    ("customers", "Customer"),
];

/// Organizational title acronyms accepted as roles on an exact match.
pub(crate) const ACRONYM_ROLES: &[&str] = &[
    "PM", "DPM", "COR", "CO", "PI", "SME", "CCB", "ERB", "IPT", "CEO", "CFO", "CIO", "CTO",
    "COO", "CISO", "ISSO", "ISSM", "AO", "TA", "LSE", "CSE",
];

/// Generic workforce nouns that are roles on their own.
pub(crate) const WORKFORCE_ROLES: &[&str] = &[
    "contractor",
    "subcontractor",
    "supplier",
    "vendor",
    "customer",
    "stakeholder",
    "operator",
    "administrator",
    "reviewer",
    "approver",
    "auditor",
    "inspector",
    "sponsor",
    "developer",
    "maintainer",
    "integrator",
    "tester",
    "analyst",
    "coordinator",
    "supervisor",
    "technician",
    "consultant",
    "architect",
    "engineer",
    "manager",
];

/// Defense and government single-word roles.
pub(crate) const DEFENSE_ROLES: &[&str] = &[
    "government",
    "commander",
    "warfighter",
    "acquirer",
    "contracting",
    "comptroller",
    "ombudsman",
    "inspector-general",
];

/// Academic single-word roles.
pub(crate) const ACADEMIC_ROLES: &[&str] = &[
    "investigator",
    "researcher",
    "faculty",
    "student",
    "advisor",
    "dean",
    "provost",
    "registrar",
    "postdoc",
];

/// Head nouns that mark a phrase as a role.
pub(crate) const ROLE_SUFFIXES: &[&str] = &[
    "engineer",
    "manager",
    "officer",
    "director",
    "lead",
    "leader",
    "administrator",
    "coordinator",
    "specialist",
    "analyst",
    "architect",
    "scientist",
    "inspector",
    "representative",
    "authority",
    "board",
    "committee",
    "team",
    "panel",
    "council",
    "chief",
    "chair",
    "chairperson",
    "owner",
    "custodian",
    "planner",
    "technician",
    "supervisor",
    "auditor",
    "reviewer",
    "approver",
    "investigator",
    "integrator",
    "operator",
    "monitor",
    "official",
    "expert",
    "agent",
    "master",
    "conductor",
    "controller",
];

/// Words that qualify a role suffix ("systems" in "Systems Engineer").
pub(crate) const ROLE_MODIFIERS: &[&str] = &[
    "systems",
    "system",
    "safety",
    "configuration",
    "quality",
    "assurance",
    "test",
    "software",
    "hardware",
    "project",
    "program",
    "mission",
    "risk",
    "data",
    "logistics",
    "reliability",
    "security",
    "design",
    "integration",
    "technical",
    "contracting",
    "chief",
    "lead",
    "senior",
    "principal",
    "deputy",
    "assistant",
    "flight",
    "ground",
    "review",
    "control",
    "change",
    "engineering",
    "product",
    "requirements",
    "verification",
    "validation",
    "operations",
    "maintenance",
    "procurement",
    "contract",
    "financial",
    "acquisition",
    "environmental",
    "mechanical",
    "electrical",
    "thermal",
    "structural",
    "manufacturing",
    "supply",
    "information",
    "cyber",
    "network",
    "facility",
    "site",
    "field",
    "release",
    "business",
    "cost",
    "resource",
    "research",
    "certification",
    "compliance",
    "integrated",
    "independent",
];

/// Phrases that pattern rules surface but that are never roles.
pub(crate) const FALSE_POSITIVES: &[&str] = &[
    "review board meeting",
    "management plan",
    "systems engineering management plan",
    "configuration management",
    "quality assurance",
    "risk management",
    "data management",
    "project management",
    "program management",
    "systems engineering",
    "test plan",
    "test report",
    "design review",
    "preliminary design review",
    "critical design review",
    "statement of work",
    "work breakdown structure",
    "interface control document",
    "requirements document",
    "concept of operations",
    "verification matrix",
    "technical data package",
    "change request",
    "engineering change proposal",
    "the system",
    "the project",
    "the program",
    "this document",
    "this plan",
    "user manual",
    "safety analysis",
    "hazard analysis",
    "lessons learned",
];

/// Organization names: never roles even when they sit in role position.
pub(crate) const ORGANIZATIONS: &[&str] = &[
    "nasa",
    "dod",
    "department of defense",
    "department of energy",
    "department of homeland security",
    "faa",
    "federal aviation administration",
    "air force",
    "army",
    "navy",
    "marine corps",
    "space force",
    "darpa",
    "nist",
    "dcma",
    "defense contract management agency",
    "gao",
    "omb",
    "gsa",
    "epa",
    "nsf",
    "noaa",
    "usgs",
    "esa",
    "jaxa",
    "ieee",
    "iso",
    "incose",
    "agency",
    "headquarters",
];

/// Single words that can never stand alone as a role.
pub(crate) const SINGLE_WORD_STOPWORDS: &[&str] = &[
    "review", "approval", "system", "systems", "process", "plan", "data", "management",
    "program", "project", "document", "report", "design", "test", "testing", "analysis",
    "requirement", "requirements", "section", "appendix", "table", "figure", "schedule",
    "activity", "activities", "task", "tasks", "effort", "phase", "milestone", "baseline",
    "change", "control", "quality", "safety", "risk", "support", "information", "operations",
    "responsibility", "responsibilities", "authority", "lead", "chief", "team", "board",
    "office", "staff", "personnel", "organization", "party", "parties", "member", "members",
    "official", "expert", "agent", "owner", "chair", "representative", "director",
];

/// Nouns that mark a phrase as a work product.
pub(crate) const DELIVERABLE_NOUNS: &[&str] = &[
    "plan",
    "report",
    "specification",
    "document",
    "procedure",
    "manual",
    "schedule",
    "matrix",
    "analysis",
    "drawing",
    "database",
    "record",
    "records",
    "baseline",
    "package",
    "memo",
    "memorandum",
    "list",
    "log",
    "study",
    "assessment",
    "proposal",
    "standard",
    "guide",
    "handbook",
    "charter",
    "agreement",
    "checklist",
    "briefing",
    "minutes",
];

/// Abbreviations kept upper-case when title-casing names.
pub(crate) const UPPERCASE_WORDS: &[&str] = &[
    "PM", "QA", "QC", "IV&V", "IT", "CM", "SE", "COR", "CO", "IPT", "CCB", "ERB", "SME", "PI",
    "ISSO", "ISSM", "AO", "DOD", "NASA", "FAA", "US", "USA", "HSI", "RAM", "T&E", "S&MA",
];

/// Leading words that signal a sentence fragment rather than a name.
pub(crate) const LEADING_NOISE: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "for", "with", "by", "in", "on", "at", "this",
    "that", "these", "those", "each", "all", "any", "such", "other", "performing", "conducting",
    "providing", "ensuring", "managing", "reviewing", "including", "if", "when", "where",
    "which", "who", "shall", "will", "must", "may", "should", "is", "are", "then", "also",
    "however", "additionally", "furthermore", "finally", "upon", "after", "before", "once",
    "our", "its", "their", "your", "every",
];

/// Trailing words that signal a sentence fragment rather than a name.
pub(crate) const TRAILING_NOISE: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "for", "with", "by", "in", "on", "at", "shall",
    "will", "must", "may", "should", "is", "are", "be", "was", "were", "has", "have", "that",
    "which", "who", "as",
];
