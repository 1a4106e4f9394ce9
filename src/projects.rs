// Portfolio project catalog
// The list is fixed at build time; the handler serves it verbatim.

use crate::api::types::ProjectRecord;

const PROJECTS: &[ProjectRecord] = &[
    ProjectRecord {
        title: "LifeAura AI / SANKALP",
        description: "Health-tech platform: MERN + OCR + Disease Prediction + FHIR",
        tags: &["React", "Node", "MongoDB", "PyTorch", "FHIR"],
        repo_url: "https://github.com/Siddharth-Jaswal/LifeAura",
        demo_url: "https://lifeaura.vercel.app",
    },
    ProjectRecord {
        title: "Portfolio Engine",
        description: "Dynamic React + Flask widgets, Apple-like design",
        tags: &["React", "Flask", "Tailwind", "Framer Motion"],
        repo_url: "https://github.com/Siddharth-Jaswal/portfolio",
        demo_url: "#",
    },
];

/// All portfolio projects, in display order.
pub const fn all() -> &'static [ProjectRecord] {
    PROJECTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ordering() {
        let first = all();
        let second = all();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].title, second[0].title);
        assert_eq!(first[0].title, "LifeAura AI / SANKALP");
        assert_eq!(first[1].title, "Portfolio Engine");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(all()).unwrap();
        let record = &json[0];
        assert!(record.get("repoUrl").is_some());
        assert!(record.get("demoUrl").is_some());
        assert!(record.get("description").is_some());
    }
}
