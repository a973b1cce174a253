//! Flow listing.

use scriptura_flows::FlowKind;
use strum::IntoEnumIterator;

/// One line per built-in flow: name, output kind and failure label.
pub fn list_flows() -> String {
    let width = FlowKind::iter()
        .map(|kind| kind.name().len())
        .max()
        .unwrap_or_default();

    FlowKind::iter()
        .map(|kind| {
            let output = if kind.is_image() { "image" } else { "text" };
            format!("{:width$}  {:5}  {}\n", kind.name(), output, kind.context())
        })
        .collect()
}
