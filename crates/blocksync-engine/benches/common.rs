// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "## Section\n\nParagraph with **bold**, *italic*, `code` and a [link](https://example.com).\n\n- Bullet point\n- Another item\n\n1. First\n2. Second\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    format!("# Title\n\n{}", base.repeat(size))
}

#[allow(dead_code)]
pub fn generate_inline_heavy_paragraph(runs: usize) -> String {
    let mut content = String::new();
    for i in 0..runs {
        content.push_str(&format!(
            "plain {i} **bold {i}** *italic {i}* `code {i}` [link {i}](https://example.com/{i}) "
        ));
    }
    content
}
