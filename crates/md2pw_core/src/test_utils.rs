use md2pw_ast::{AstArena, TxtNode};
use md2pw_parser::{MarkdownParser, Parser};

/// Parses `source` with the default Markdown parser.
pub fn parse<'a>(arena: &'a AstArena, source: &str) -> TxtNode<'a> {
    MarkdownParser::new()
        .parse(arena, source)
        .expect("test source should parse")
}
