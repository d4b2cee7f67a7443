//! Rigid links between a primary node and one or more secondary nodes.
//!
//! The external application only knows two-point links, so a link with
//! several secondaries is split into one link per secondary named
//! `"{name}:::{index}"`, and split parts read back are joined again by
//! their base name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between the base name and the part index of a split link
pub const SPLIT_SEPARATOR: &str = ":::";

/// Which relative DOFs a link ties together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConstraint {
    pub name: String,
    /// x, y, z, rx, ry, rz; `true` when the DOF is rigidly connected
    pub fixity: [bool; 6],
}

impl LinkConstraint {
    pub fn fixed() -> Self {
        LinkConstraint {
            name: "Fixed".to_string(),
            fixity: [true; 6],
        }
    }

    /// Translations tied, rotations free
    pub fn pinned() -> Self {
        LinkConstraint {
            name: "Pinned".to_string(),
            fixity: [true, true, true, false, false, false],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidLink {
    pub id: Uuid,
    pub name: String,
    pub primary: Uuid,
    pub secondaries: Vec<Uuid>,
    pub constraint: LinkConstraint,
}

impl RigidLink {
    pub fn new(name: impl Into<String>, primary: Uuid, secondaries: Vec<Uuid>, constraint: LinkConstraint) -> Self {
        RigidLink {
            id: Uuid::new_v4(),
            name: name.into(),
            primary,
            secondaries,
            constraint,
        }
    }

    /// Split into single-secondary links.
    ///
    /// A link with at most one secondary is returned unchanged.
    pub fn split(&self) -> Vec<RigidLink> {
        if self.secondaries.len() <= 1 {
            return vec![self.clone()];
        }

        self.secondaries
            .iter()
            .enumerate()
            .map(|(i, secondary)| RigidLink {
                id: Uuid::new_v4(),
                name: format!("{}{}{}", self.name, SPLIT_SEPARATOR, i),
                primary: self.primary,
                secondaries: vec![*secondary],
                constraint: self.constraint.clone(),
            })
            .collect()
    }
}

/// Join split link parts back into multi-secondary links.
///
/// Links whose name has no separator pass through unchanged. Parts are
/// grouped by base name in first-seen order; each joined link takes the
/// primary of its first part and the constraint of the first link in the
/// input.
pub fn join_rigid_links(links: &[RigidLink]) -> Vec<RigidLink> {
    let Some(first) = links.first() else {
        return Vec::new();
    };
    let constraint = first.constraint.clone();

    let mut joined = Vec::new();
    let mut groups: Vec<(String, Uuid, Vec<Uuid>)> = Vec::new();

    for link in links {
        match link.name.split_once(SPLIT_SEPARATOR) {
            None => joined.push(link.clone()),
            Some((base, _)) => {
                let Some(secondary) = link.secondaries.first() else {
                    continue;
                };
                match groups.iter_mut().find(|(name, _, _)| name == base) {
                    Some((_, _, secondaries)) => secondaries.push(*secondary),
                    None => groups.push((base.to_string(), link.primary, vec![*secondary])),
                }
            }
        }
    }

    joined.extend(
        groups
            .into_iter()
            .map(|(name, primary, secondaries)| RigidLink::new(name, primary, secondaries, constraint.clone())),
    );
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_secondary_is_identity() {
        let link = RigidLink::new("L1", Uuid::new_v4(), vec![Uuid::new_v4()], LinkConstraint::fixed());
        let parts = link.split();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].id, link.id);
        assert_eq!(parts[0].name, "L1");
    }

    #[test]
    fn test_split_names_parts() {
        let secondaries = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let link = RigidLink::new("L1", Uuid::new_v4(), secondaries.clone(), LinkConstraint::pinned());
        let parts = link.split();

        let names: Vec<_> = parts.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["L1:::0", "L1:::1", "L1:::2"]);
        assert_eq!(parts[2].secondaries, vec![secondaries[2]]);
        assert!(parts.iter().all(|p| p.primary == link.primary));
    }

    #[test]
    fn test_join_reverses_split() {
        let primary = Uuid::new_v4();
        let secondaries = vec![Uuid::new_v4(), Uuid::new_v4()];
        let link = RigidLink::new("Core", primary, secondaries.clone(), LinkConstraint::fixed());
        let plain = RigidLink::new("Plain", primary, vec![Uuid::new_v4()], LinkConstraint::fixed());

        let mut parts = link.split();
        parts.push(plain.clone());
        let joined = join_rigid_links(&parts);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].name, "Plain");
        assert_eq!(joined[1].name, "Core");
        assert_eq!(joined[1].primary, primary);
        assert_eq!(joined[1].secondaries, secondaries);
    }

    #[test]
    fn test_join_empty() {
        assert!(join_rigid_links(&[]).is_empty());
    }
}
