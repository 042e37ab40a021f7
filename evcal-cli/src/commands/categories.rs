use anyhow::Result;
use evcal_core::Category;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run() -> Result<()> {
    for category in Category::ALL {
        let style = category.style();
        println!(
            "  {:<14} {}",
            category.render(),
            format!("{}  {}  {}", style.id, style.token, style.hex()).dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_prints_every_category() {
        assert!(run().is_ok());
    }
}
