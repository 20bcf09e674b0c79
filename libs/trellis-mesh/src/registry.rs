//! # Group / Material Registry
//!
//! Named triangle-id buckets bound to materials. Groups partition a mesh for
//! presentation and export; they carry no topology.
//!
//! A group's material name does not have to resolve. Lookups through
//! [`Mesh::group_material`] fall back to the default material.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, trace};

use config::constants::{MIN_VARIATIONS, VARIATION_COLOR_SCALE};

use crate::color::Color;
use crate::error::{MeshError, MeshResult};
use crate::material::Material;
use crate::mesh::{Mesh, TriangleId};

/// A material binding plus an ordered list of triangle ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub material_name: String,
    pub tri_ids: Vec<TriangleId>,
}

impl Group {
    /// Creates an empty group bound to `material_name`.
    pub fn new(material_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            tri_ids: Vec::new(),
        }
    }

    pub fn with_triangles(mut self, tri_ids: impl IntoIterator<Item = TriangleId>) -> Self {
        self.tri_ids.extend(tri_ids);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tri_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tri_ids.is_empty()
    }
}

impl Mesh {
    /// Groups keyed by name.
    #[inline]
    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    #[inline]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    #[inline]
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.get_mut(name)
    }

    /// Returns the named group, creating it bound to `material_name` if it
    /// does not exist. An existing group keeps its binding.
    pub fn add_group(&mut self, name: &str, material_name: &str) -> &mut Group {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(material_name))
    }

    /// Stores a group, replacing any group of the same name.
    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) -> Option<Group> {
        self.groups.insert(name.into(), group)
    }

    pub fn remove_group(&mut self, name: &str) -> Option<Group> {
        self.groups.remove(name)
    }

    /// Appends triangle ids to a group. Returns false if the group is missing.
    pub fn assign_triangles(
        &mut self,
        name: &str,
        tri_ids: impl IntoIterator<Item = TriangleId>,
    ) -> bool {
        match self.groups.get_mut(name) {
            Some(group) => {
                group.tri_ids.extend(tri_ids);
                true
            }
            None => false,
        }
    }

    /// Rebinds a group to another material. Returns false if the group is missing.
    pub fn set_group_material(&mut self, name: &str, material_name: &str) -> bool {
        match self.groups.get_mut(name) {
            Some(group) => {
                group.material_name = material_name.to_string();
                true
            }
            None => false,
        }
    }

    /// The material a group is bound to, or the default material when the
    /// group or its material is missing.
    pub fn group_material(&self, name: &str) -> &Material {
        match self.groups.get(name) {
            Some(group) => self.material(&group.material_name),
            None => self.default_material(),
        }
    }

    /// Name of the first group (in name order) that lists `triangle`.
    pub fn owning_group(&self, triangle: TriangleId) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, group)| group.tri_ids.contains(&triangle))
            .map(|(name, _)| name.as_str())
    }

    /// Changes a material's base color in place. Returns false on a miss.
    pub fn recolor_material(&mut self, name: &str, color: Color) -> bool {
        match self.find_material_mut(name) {
            Some(material) => {
                material.base_color = color;
                true
            }
            None => false,
        }
    }

    /// Moves every triangle id of `source` into `dest` and deletes `source`.
    ///
    /// Ids already present in `dest` are not deduplicated. A missing `dest` is
    /// created bound to the source's material. Returns false (and changes
    /// nothing) when `source` does not exist.
    pub fn dissolve_group(&mut self, source: &str, dest: &str) -> bool {
        if source == dest {
            return self.groups.contains_key(source);
        }
        let Some(removed) = self.groups.remove(source) else {
            return false;
        };

        trace!(source, dest, count = removed.tri_ids.len(), "dissolving group");
        let target = self
            .groups
            .entry(dest.to_string())
            .or_insert_with(|| Group::new(removed.material_name.clone()));
        target.tri_ids.extend(removed.tri_ids);
        true
    }

    /// Splits a group into randomly varied siblings.
    ///
    /// Synthesizes `count` materials by perturbing the group's material
    /// (each RGB channel by at most `amount * 255`, metallic and roughness by
    /// at most `amount`, all clamped), creates one empty group per material,
    /// then scatters the original triangle ids uniformly across the new groups
    /// and the emptied original (`count + 1` destinations).
    ///
    /// Returns the names of the new groups; a missing group yields none.
    ///
    /// # Errors
    ///
    /// Fails if `amount` is not a positive finite number or `count < 2`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use trellis_mesh::{Group, Mesh};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.insert_group("All", Group::new("Default").with_triangles(0..12));
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let created = mesh.variate_group("All", 0.1, 2, &mut rng).unwrap();
    /// assert_eq!(created.len(), 2);
    /// assert_eq!(mesh.groups().values().map(|g| g.len()).sum::<usize>(), 12);
    /// ```
    pub fn variate_group<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        amount: f32,
        count: usize,
        rng: &mut R,
    ) -> MeshResult<Vec<String>> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(MeshError::validation(format!(
                "Variation amount must be positive: {amount}"
            )));
        }
        if count < MIN_VARIATIONS {
            return Err(MeshError::validation(format!(
                "Variation count must be at least {MIN_VARIATIONS}: {count}"
            )));
        }
        if !self.groups.contains_key(name) {
            debug!(group = name, "variate_group on missing group");
            return Ok(Vec::new());
        }

        let base = self.group_material(name).clone();
        let mut created = Vec::with_capacity(count);
        let mut material_suffix = 1;
        let mut group_suffix = 1;

        for _ in 0..count {
            let material_name = self.free_name(&base.name, &mut material_suffix, |mesh, n| {
                mesh.has_material(n)
            });
            let group_name = self.free_name(name, &mut group_suffix, |mesh, n| {
                mesh.groups.contains_key(n)
            });

            let mut material = perturb(&base, amount, rng);
            material.name = material_name.clone();
            self.add_material(material);
            self.groups.insert(group_name.clone(), Group::new(material_name));
            created.push(group_name);
        }

        let tri_ids = match self.groups.get_mut(name) {
            Some(group) => std::mem::take(&mut group.tri_ids),
            None => Vec::new(),
        };
        let total = tri_ids.len();

        for tri_id in tri_ids {
            let slot = rng.gen_range(0..=count);
            let target = if slot == 0 { name } else { created[slot - 1].as_str() };
            if let Some(group) = self.groups.get_mut(target) {
                group.tri_ids.push(tri_id);
            }
        }

        debug!(group = name, count, triangles = total, "varied group");
        Ok(created)
    }

    /// Finds `"{base}_{k}"` for the smallest `k >= *suffix` that `taken`
    /// rejects, and advances `suffix` past it.
    fn free_name(
        &self,
        base: &str,
        suffix: &mut usize,
        taken: impl Fn(&Mesh, &str) -> bool,
    ) -> String {
        loop {
            let candidate = format!("{base}_{suffix}");
            *suffix += 1;
            if !taken(self, &candidate) {
                return candidate;
            }
        }
    }
}

/// Copy of `base` with bounded noise on color, metallic and roughness.
///
/// Noise wider than a channel or factor range saturates under the clamp, so
/// the ranges are capped there.
fn perturb<R: Rng + ?Sized>(base: &Material, amount: f32, rng: &mut R) -> Material {
    let color_range = (amount * VARIATION_COLOR_SCALE).min(255.0);
    let amount = amount.min(1.0);
    let mut channel = |value: u8| {
        let shifted = f32::from(value) + rng.gen_range(-color_range..=color_range);
        shifted.round().clamp(0.0, 255.0) as u8
    };
    let c = base.base_color;
    let base_color = Color::new(channel(c.r), channel(c.g), channel(c.b), c.a);

    let metallic = (base.metallic + rng.gen_range(-amount..=amount)).clamp(0.0, 1.0);
    let roughness = (base.roughness + rng.gen_range(-amount..=amount)).clamp(0.0, 1.0);

    Material {
        name: base.name.clone(),
        base_color,
        metallic,
        roughness,
        texture: base.texture.clone(),
    }
}
