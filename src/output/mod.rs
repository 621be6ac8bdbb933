/// Renders a replacement as SQL text or JSON and writes it out.
pub mod formatter;
