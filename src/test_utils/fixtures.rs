//! Template trees for tests
//!
//! Each fixture is a set of named template sources plus the output expected
//! from rendering its entry template with [`TemplateFixture::context`].

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A small template directory with a known rendering
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    /// Template to render
    pub entry: String,
    /// `(name, source)` pairs, names relative to the template directory
    pub files: Vec<(String, String)>,
    /// Render context as JSON text
    pub context: String,
    /// Expected render output
    pub expected: String,
}

impl TemplateFixture {
    /// YAML document including a multi-line mapping two levels deep
    pub fn yaml_service() -> Self {
        Self {
            entry: "compose.yaml".to_string(),
            files: vec![
                (
                    "compose.yaml".to_string(),
                    "services:\n  web:\n    {% indented-include \"web.yaml\" %}\n".to_string(),
                ),
                (
                    "web.yaml".to_string(),
                    "image: {{ image }}\nports:\n  - \"{{ port }}:80\"".to_string(),
                ),
            ],
            context: r#"{"image": "nginx:1.27", "port": 8080}"#.to_string(),
            expected: "services:\n  web:\n    image: nginx:1.27\n    ports:\n      - \"8080:80\""
                .to_string(),
        }
    }

    /// Directive inside a loop, including a partial per item
    pub fn nested_loop() -> Self {
        Self {
            entry: "list.txt".to_string(),
            files: vec![
                (
                    "list.txt".to_string(),
                    "{% for item in items %}\n- {{ item.name }}:\n    {% indented-include 'item.txt' %}\n{% endfor %}"
                        .to_string(),
                ),
                ("item.txt".to_string(), "id: {{ item.id }}\nnote: ok".to_string()),
            ],
            context: r#"{"items": [{"name": "a", "id": 1}, {"name": "b", "id": 2}]}"#.to_string(),
            expected: "\n- a:\n    id: 1\n    note: ok\n\n- b:\n    id: 2\n    note: ok\n"
                .to_string(),
        }
    }

    /// Entry template where a directive follows other text on its line
    pub fn misplaced() -> Self {
        Self {
            entry: "bad.txt".to_string(),
            files: vec![
                ("bad.txt".to_string(), "first\nkey: {% indented-include 'value.txt' %}".to_string()),
                ("value.txt".to_string(), "v".to_string()),
            ],
            context: "{}".to_string(),
            expected: String::new(),
        }
    }

    /// Write every template below `dir`, creating directories as needed.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        for (name, source) in &self.files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}
