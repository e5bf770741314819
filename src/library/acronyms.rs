//! Built-in acronym tables for aerospace, defense and systems-engineering text.

/// Acronym → expansion.
pub(crate) const ACRONYM_DICTIONARY: &[(&str, &str)] = &[
    ("AI", "Artificial Intelligence"),
    ("AO", "Authorizing Official"),
    ("API", "Application Programming Interface"),
    ("ATO", "Authority to Operate"),
    ("CCB", "Configuration Control Board"),
    ("CDR", "Critical Design Review"),
    ("CDRL", "Contract Data Requirements List"),
    ("CI", "Configuration Item"),
    ("CM", "Configuration Management"),
    ("CMMI", "Capability Maturity Model Integration"),
    ("CO", "Contracting Officer"),
    ("CONOPS", "Concept of Operations"),
    ("COR", "Contracting Officer's Representative"),
    ("COTS", "Commercial Off-the-Shelf"),
    ("CSCI", "Computer Software Configuration Item"),
    ("DID", "Data Item Description"),
    ("DoD", "Department of Defense"),
    ("ECP", "Engineering Change Proposal"),
    ("EMI", "Electromagnetic Interference"),
    ("ERB", "Engineering Review Board"),
    ("EVM", "Earned Value Management"),
    ("FAA", "Federal Aviation Administration"),
    ("FAR", "Federal Acquisition Regulation"),
    ("FCA", "Functional Configuration Audit"),
    ("FMEA", "Failure Modes and Effects Analysis"),
    ("FRR", "Flight Readiness Review"),
    ("GFE", "Government Furnished Equipment"),
    ("GFI", "Government Furnished Information"),
    ("HSI", "Human Systems Integration"),
    ("HWCI", "Hardware Configuration Item"),
    ("I&T", "Integration and Test"),
    ("ICD", "Interface Control Document"),
    ("IMS", "Integrated Master Schedule"),
    ("IMP", "Integrated Master Plan"),
    ("INCOSE", "International Council on Systems Engineering"),
    ("IPT", "Integrated Product Team"),
    ("IRS", "Interface Requirements Specification"),
    ("ISSM", "Information System Security Manager"),
    ("ISSO", "Information System Security Officer"),
    ("IT", "Information Technology"),
    ("IV&V", "Independent Verification and Validation"),
    ("KPP", "Key Performance Parameter"),
    ("MBSE", "Model-Based Systems Engineering"),
    ("MOE", "Measure of Effectiveness"),
    ("MOP", "Measure of Performance"),
    ("MRR", "Mission Readiness Review"),
    ("NASA", "National Aeronautics and Space Administration"),
    ("NIST", "National Institute of Standards and Technology"),
    ("O&M", "Operations and Maintenance"),
    ("ORR", "Operational Readiness Review"),
    ("PCA", "Physical Configuration Audit"),
    ("PDR", "Preliminary Design Review"),
    ("PI", "Principal Investigator"),
    ("PM", "Program Manager"),
    ("PMP", "Project Management Plan"),
    ("POC", "Point of Contact"),
    ("PRR", "Production Readiness Review"),
    ("QA", "Quality Assurance"),
    ("QC", "Quality Control"),
    ("RAM", "Reliability, Availability, and Maintainability"),
    ("RFP", "Request for Proposal"),
    ("RMP", "Risk Management Plan"),
    ("RTM", "Requirements Traceability Matrix"),
    ("S&MA", "Safety and Mission Assurance"),
    ("SDP", "Software Development Plan"),
    ("SE", "Systems Engineering"),
    ("SEMP", "Systems Engineering Management Plan"),
    ("SME", "Subject Matter Expert"),
    ("SOW", "Statement of Work"),
    ("SRR", "System Requirements Review"),
    ("SRS", "Software Requirements Specification"),
    ("SSP", "System Security Plan"),
    ("SVR", "System Verification Review"),
    ("T&E", "Test and Evaluation"),
    ("TBD", "To Be Determined"),
    ("TBR", "To Be Resolved"),
    ("TEMP", "Test and Evaluation Master Plan"),
    ("TPM", "Technical Performance Measure"),
    ("TRL", "Technology Readiness Level"),
    ("TRR", "Test Readiness Review"),
    ("V&V", "Verification and Validation"),
    ("WBS", "Work Breakdown Structure"),
];

/// Upper-case tokens that look like acronyms but are ordinary words,
/// directive keywords, or roman numerals.
pub(crate) const NON_ACRONYMS: &[&str] = &[
    "A", "I", "AN", "AND", "ARE", "AS", "AT", "BE", "BY", "FOR", "IF", "IN", "IS", "NO",
    "NOT", "OF", "ON", "OR", "SO", "THE", "TO", "UP", "US", "WE", "ALL", "ANY", "MAY", "MUST",
    "SHALL", "SHOULD", "WILL", "NOTE", "NOTES", "WARNING", "CAUTION", "TABLE", "FIGURE",
    "SECTION", "APPENDIX", "PART", "ID", "OK", "NA", "N/A", "YES", "II", "III", "IV", "VI",
    "VII", "VIII", "IX", "XI", "XII", "XIII", "XIV", "XV", "XX", "AM",
];
