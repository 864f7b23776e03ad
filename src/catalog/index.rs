//! Explicit many-to-many index between products and their tags/colors.
//!
//! Built once after load and shared by the query engine (tag/color set
//! algebra) and the result sink (per-product tag and color lists).

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::model::{ColorAssociation, TagAssociation};

/// A color attached to a product, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSwatch {
    pub name: String,
    pub hex_value: String,
}

#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    tags_by_product: HashMap<String, Vec<String>>,
    colors_by_product: HashMap<String, Vec<ColorSwatch>>,
    products_by_tag: HashMap<String, HashSet<String>>,
    products_by_color: HashMap<String, HashSet<String>>,
}

impl RelationIndex {
    pub fn build(tags: Option<&[TagAssociation]>, colors: Option<&[ColorAssociation]>) -> Self {
        let mut index = Self::default();

        for row in tags.unwrap_or_default() {
            let product_tags = index.tags_by_product.entry(row.product_id.clone()).or_default();
            if !product_tags.contains(&row.tag) {
                product_tags.push(row.tag.clone());
            }
            index
                .products_by_tag
                .entry(row.tag.clone())
                .or_default()
                .insert(row.product_id.clone());
        }

        for row in colors.unwrap_or_default() {
            index
                .colors_by_product
                .entry(row.product_id.clone())
                .or_default()
                .push(ColorSwatch {
                    name: row.colour_name.clone(),
                    hex_value: row.hex_value.clone(),
                });
            index
                .products_by_color
                .entry(row.match_key())
                .or_default()
                .insert(row.product_id.clone());
        }

        index
    }

    /// Distinct tags of a product in table order.
    pub fn tags_for(&self, product_id: &str) -> &[String] {
        self.tags_by_product
            .get(product_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Colors of a product in table order.
    pub fn colors_for(&self, product_id: &str) -> &[ColorSwatch] {
        self.colors_by_product
            .get(product_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Products carrying *every* tag. An empty tag list yields `None`
    /// (no constraint), never the empty set.
    pub fn products_with_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> Option<HashSet<&str>> {
        let mut sets = tags.iter().map(|tag| self.ids_for(&self.products_by_tag, tag.as_ref()));
        let first = sets.next()?;
        Some(sets.fold(first, |acc, next| acc.intersection(&next).copied().collect()))
    }

    /// Products carrying *at least one* color, matched case-insensitively.
    pub fn products_with_any_color<S: AsRef<str>>(&self, colors: &[S]) -> HashSet<&str> {
        colors
            .iter()
            .flat_map(|color| {
                self.ids_for(&self.products_by_color, &color.as_ref().to_lowercase())
            })
            .collect()
    }

    fn ids_for<'a>(&'a self, map: &'a HashMap<String, HashSet<String>>, key: &str) -> HashSet<&'a str> {
        map.get(key)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
