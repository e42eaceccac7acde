//! Typed inbound queries and their prompt material.
//!
//! One [`Query`] value is built per request and never mutated. Each variant
//! knows its natural-language prompt, its fixed system instruction, and the
//! JSON shape the answer is expected to take.

use crate::extract::{RecordKind, Shape};

/// One product-related question, as accepted on the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Head-to-head comparison of two named products.
    Compare { product1: String, product2: String },
    /// Product discovery from free-text criteria.
    Find { criteria: String },
    /// Recent releases, news, and trends for a category.
    Updates { category: String },
}

impl Query {
    /// The user-role prompt sent to the answer API.
    pub fn user_prompt(&self) -> String {
        match self {
            Query::Compare { product1, product2 } => format!(
                "Compare these products in detail: \"{product1}\" and \"{product2}\". \
                 Include: price ranges, key features, performance metrics, pros and cons, \
                 and which types of users each product is best for. \
                 Format the response as JSON with the following structure: \
                 {{ \"product1\": {{ \"name\", \"price\", \"rating\", \"keyFeatures\", \"pros\", \"cons\", \"idealFor\" }}, \
                 \"product2\": {{ same structure }}, \
                 \"comparisonMetrics\": [{{ \"name\", \"product1Score\", \"product2Score\" }}] }}"
            ),
            Query::Find { criteria } => format!(
                "Find products that match these criteria: {criteria}. \
                 For each product, provide the name, a brief description, key features, \
                 approximate price range, brand, category, rating (1-5), release date, and pros/cons. \
                 Limit to 5 best matches. \
                 Format the response as a JSON array with objects having the following properties: \
                 id, name, description, price, features (array), category, brand, rating, releaseDate, imageUrl."
            ),
            Query::Updates { category } => format!(
                "Find the latest product updates, news, and trends for the {category} category. \
                 Include new releases, price changes, comparison studies, and buying guides. \
                 For each update, provide a title, brief description, date, category, image URL, source, and link. \
                 Format the response as a JSON array with objects having the following properties: \
                 id, title, description, date, category, imageUrl, source, url."
            ),
        }
    }

    /// The fixed system-role instruction for this variant.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Query::Compare { .. } => {
                "You are a product comparison expert. Provide detailed, accurate comparisons \
                 between products in a structured JSON format. Include specific metrics, \
                 pros/cons, and target user information."
            }
            Query::Find { .. } => {
                "You are a product recommendation expert. Find and recommend products based on \
                 user criteria. Return results in a structured JSON array format with detailed \
                 product information."
            }
            Query::Updates { .. } => {
                "You are a product news and updates expert. Provide the latest information about \
                 products in a specific category. Return results in a structured JSON array format."
            }
        }
    }

    /// Shape the extractor should coerce the answer into.
    pub fn expected_shape(&self) -> Shape {
        match self {
            Query::Compare { .. } => Shape::Object,
            Query::Find { .. } => Shape::Array(RecordKind::Product),
            Query::Updates { .. } => Shape::Array(RecordKind::Update),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_prompt_names_both_products() {
        let q = Query::Compare {
            product1: "iPhone 16".into(),
            product2: "Pixel 9".into(),
        };
        let prompt = q.user_prompt();
        assert!(prompt.contains("\"iPhone 16\""));
        assert!(prompt.contains("\"Pixel 9\""));
        assert!(prompt.contains("comparisonMetrics"));
        assert_eq!(q.expected_shape(), Shape::Object);
    }

    #[test]
    fn find_prompt_embeds_criteria_and_field_list() {
        let q = Query::Find {
            criteria: "noise cancelling headphones under $200".into(),
        };
        let prompt = q.user_prompt();
        assert!(prompt.contains("noise cancelling headphones under $200"));
        assert!(prompt.contains("releaseDate"));
        assert!(prompt.contains("Limit to 5 best matches"));
        assert_eq!(q.expected_shape(), Shape::Array(RecordKind::Product));
    }

    #[test]
    fn updates_prompt_embeds_category() {
        let q = Query::Updates {
            category: "smartphones".into(),
        };
        assert!(q.user_prompt().contains("smartphones category"));
        assert_eq!(q.expected_shape(), Shape::Array(RecordKind::Update));
    }

    #[test]
    fn system_prompts_differ_per_variant() {
        let compare = Query::Compare {
            product1: "a".into(),
            product2: "b".into(),
        }
        .system_prompt();
        let find = Query::Find {
            criteria: "c".into(),
        }
        .system_prompt();
        let updates = Query::Updates {
            category: "d".into(),
        }
        .system_prompt();
        assert_ne!(compare, find);
        assert_ne!(find, updates);
        assert!(compare.contains("comparison expert"));
    }
}
