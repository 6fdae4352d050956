use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub name: &'static str,
    /// Display colour as a CSS hex string.
    pub color: &'static str,
    pub icon: &'static str,
}

pub static CATEGORIES: &[(&str, Category)] = &[
    (
        "contract",
        Category {
            name: "Contract Law",
            color: "#2563eb",
            icon: "",
        },
    ),
    (
        "employment",
        Category {
            name: "Employment Law",
            color: "#10b981",
            icon: "",
        },
    ),
    (
        "intellectual_property",
        Category {
            name: "Intellectual Property",
            color: "#8b5cf6",
            icon: "",
        },
    ),
    (
        "compliance",
        Category {
            name: "Compliance",
            color: "#f59e0b",
            icon: "",
        },
    ),
    (
        "litigation",
        Category {
            name: "Litigation",
            color: "#ef4444",
            icon: "",
        },
    ),
    (
        "corporate",
        Category {
            name: "Corporate Law",
            color: "#6366f1",
            icon: "",
        },
    ),
    (
        "privacy",
        Category {
            name: "Privacy & Data",
            color: "#06b6d4",
            icon: "",
        },
    ),
    (
        "real_estate",
        Category {
            name: "Real Estate",
            color: "#ec4899",
            icon: "",
        },
    ),
];
