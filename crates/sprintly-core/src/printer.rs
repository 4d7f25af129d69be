//! Status/product grouping and line emission.

use crate::item::{Item, ItemStatus, Product};
use crate::render::{Renderer, Style};

/// Base of the product links shown in group headers.
const PRODUCT_URL: &str = "https://sprint.ly/product";

/// Marker shown before the title of an in-progress child item.
const IN_PROGRESS_MARKER: &str = "\u{29c1} ";

/// Bucket iteration order: the four statuses, alphabetical by wire key.
const STATUS_ORDER: [ItemStatus; 4] = [
    ItemStatus::Accepted,
    ItemStatus::Backlog,
    ItemStatus::Completed,
    ItemStatus::InProgress,
];

/// Prints an assembled product list as status-grouped, templated lines.
///
/// Performs no I/O itself: every finished line (terminated with `\r\n`) is
/// handed to the caller's `emit` callback.
pub struct ListPrinter<'a> {
    renderer: &'a Renderer,
}

impl<'a> ListPrinter<'a> {
    #[must_use]
    pub const fn new(renderer: &'a Renderer) -> Self {
        Self { renderer }
    }

    /// Render all products' items grouped by status.
    ///
    /// Buckets iterate in the fixed status order; within a bucket, products
    /// appear in the order first encountered. Items with a status outside
    /// the four known buckets are skipped. When nothing matched any bucket a
    /// single "No assigned items" line is emitted instead.
    pub fn print<F: FnMut(&str)>(&self, products: &[Product], mut emit: F) {
        let mut total = 0usize;

        for status in STATUS_ORDER {
            let mut groups: Vec<(&Product, Vec<&Item>)> = Vec::new();
            for product in products {
                let items: Vec<&Item> = product
                    .items
                    .iter()
                    .filter(|item| item.status == status)
                    .collect();
                if !items.is_empty() {
                    total += items.len();
                    groups.push((product, items));
                }
            }

            if groups.is_empty() {
                continue;
            }

            self.line(
                &mut emit,
                status.heading(),
                &[Style::BrightMagenta, Style::Underline],
            );

            for (product, items) in groups {
                let header = format!(
                    "${{DEFAULT}}Product: ${{BOLD}}${{BRIGHT_BLUE}}{}${{NORMAL}}${{GREY}} ({PRODUCT_URL}/{}/)",
                    product.name, product.id
                );
                self.line(&mut emit, &header, &[]);

                for item in items {
                    self.item_line(&mut emit, item, 0);
                    for child in &item.children {
                        self.item_line(&mut emit, child, 1);
                    }
                }
            }

            self.line(&mut emit, "", &[]);
        }

        if total == 0 {
            self.line(&mut emit, "No assigned items", &[Style::Green]);
        }
    }

    fn item_line<F: FnMut(&str)>(&self, emit: &mut F, item: &Item, depth: usize) {
        let color = item
            .item_type
            .color_name()
            .map_or_else(String::new, |name| format!("${{{name}}}"));
        let indent = "  ".repeat(depth);

        let title = if depth > 0 && item.status == ItemStatus::InProgress {
            format!("${{GREEN}}{IN_PROGRESS_MARKER}${{DEFAULT}}{}", item.title)
        } else {
            item.title.clone()
        };

        let text = format!(
            "{color}{indent} #{}${{DEFAULT}}:${{DEFAULT}} {title}",
            item.number
        );

        let styles: &[Style] = if item.status.is_closed() {
            &[Style::Dim]
        } else {
            &[]
        };
        self.line(emit, &text, styles);
    }

    fn line<F: FnMut(&str)>(&self, emit: &mut F, text: &str, styles: &[Style]) {
        let rendered = self.renderer.render(text, styles, true);
        emit(&format!("{rendered}\r\n"));
    }
}
