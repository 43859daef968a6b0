//! Example: Responsive layout across viewports

use anyhow::Result;
use fxlayout::{DomTree, LayoutModule, NodeId, Viewport};

fn div(dom: &mut DomTree, parent: NodeId, attrs: &[(&str, &str)]) -> Result<NodeId> {
    let el = dom.create_element("div");
    for (name, value) in attrs {
        dom.set_attribute(el, name, value)?;
    }
    dom.append_child(parent, el)?;
    Ok(el)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("fxlayout v{}", fxlayout::VERSION);

    let mut dom = DomTree::new();
    let html = dom.create_element("html");
    dom.append_child(dom.root(), html)?;

    let row = div(&mut dom, html, &[
        ("fxLayout", "row"),
        ("fxLayout.xs", "column"),
        ("fxLayoutGap", "12px"),
    ])?;
    let side = div(&mut dom, row, &[("fxFlex", "30"), ("fxHide.xs", "")])?;
    let content = div(&mut dom, row, &[("fxFlex", ""), ("gdColumns", "1fr 1fr"), ("gdColumns.xs", "1fr")])?;

    let mut runtime = LayoutModule::default().bootstrap(dom)?;

    for (label, width) in [("desktop", 1280.0), ("phone", 375.0)] {
        runtime.set_viewport(Viewport::screen(width, 800.0));
        println!("\n{} ({}px)", label, width);
        for (name, el) in [("row", row), ("side", side), ("content", content)] {
            let style = runtime.dom().attribute(el, "style").unwrap_or_default();
            println!("  {:<8} {}", name, style);
        }
    }

    runtime.teardown();
    Ok(())
}
