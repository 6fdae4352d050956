//! Plain-language definitions of common legal terms.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlossaryTerm {
    pub term: &'static str,
    pub definition: &'static str,
    pub example: &'static str,
}

pub static GLOSSARY: &[(&str, GlossaryTerm)] = &[
    (
        "nda",
        GlossaryTerm {
            term: "Non-Disclosure Agreement (NDA)",
            definition: "A legal contract that creates a confidential relationship between parties to protect sensitive information from being disclosed to third parties.",
            example: "An NDA is commonly used when companies discuss potential business partnerships.",
        },
    ),
    (
        "consideration",
        GlossaryTerm {
            term: "Consideration",
            definition: "Something of value given in exchange for a promise, necessary for a contract to be legally binding.",
            example: "In a sale contract, money is the consideration given in exchange for goods.",
        },
    ),
    (
        "liability",
        GlossaryTerm {
            term: "Liability",
            definition: "Legal responsibility or obligation. A person or entity can be held liable for damages, debts, or legal obligations.",
            example: "If a company breaches a contract, it may face liability for resulting damages.",
        },
    ),
    (
        "jurisdiction",
        GlossaryTerm {
            term: "Jurisdiction",
            definition: "The authority of a court to hear and decide a case, or the geographic area over which a court has authority.",
            example: "A contract may specify that disputes will be resolved in California courts.",
        },
    ),
    (
        "indemnification",
        GlossaryTerm {
            term: "Indemnification",
            definition: "A contractual obligation where one party agrees to compensate another for losses or damages arising from specific circumstances.",
            example: "A service agreement may include indemnification clauses protecting one party from third-party claims.",
        },
    ),
    (
        "force_majeure",
        GlossaryTerm {
            term: "Force Majeure",
            definition: "A clause that excuses a party from performing contractual obligations due to extraordinary circumstances beyond their control (e.g., natural disasters, war).",
            example: "A force majeure clause may excuse performance during a pandemic or natural disaster.",
        },
    ),
    (
        "arbitration",
        GlossaryTerm {
            term: "Arbitration",
            definition: "A method of dispute resolution where parties submit their case to a neutral third party (arbitrator) instead of going to court.",
            example: "Many contracts include arbitration clauses requiring disputes to be resolved through arbitration rather than litigation.",
        },
    ),
    (
        "intellectual_property",
        GlossaryTerm {
            term: "Intellectual Property (IP)",
            definition: "Legal rights protecting creations of the mind, including patents, trademarks, copyrights, and trade secrets.",
            example: "A software company may protect its code through copyright and trade secret laws.",
        },
    ),
    (
        "statute_of_limitations",
        GlossaryTerm {
            term: "Statute of Limitations",
            definition: "A law that sets the maximum time period after an event within which legal proceedings may be initiated.",
            example: "Many states have a 3-year statute of limitations for breach of contract claims.",
        },
    ),
    (
        "due_diligence",
        GlossaryTerm {
            term: "Due Diligence",
            definition: "The investigation or audit of a business or person before signing a contract or agreement.",
            example: "Before acquiring a company, the buyer conducts due diligence to review financial records and legal matters.",
        },
    ),
];

pub fn find(id: &str) -> Option<&'static GlossaryTerm> {
    GLOSSARY
        .iter()
        .find(|(term_id, _)| *term_id == id)
        .map(|(_, term)| term)
}
