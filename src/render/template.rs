use regex::Regex;

use super::error::{RenderError, RenderResult};
use super::ViewData;

/// `{{name}}`, `{{#section}}`, `{{/section}}` or `{{.}}`
const TAG_PATTERN: &str = r"\{\{\s*([#/]?)\s*([A-Za-z]+|\.)\s*\}\}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Body,
    Titles,
    /// Current element inside a section
    Item,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "body" => Some(Field::Body),
            "titles" => Some(Field::Titles),
            "." => Some(Field::Item),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
            Field::Titles => "titles",
            Field::Item => ".",
        }
    }

    fn is_list(&self) -> bool {
        matches!(self, Field::Titles)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Field),
    Section(Field, Vec<Node>),
}

/// A compiled template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(name: &str, source: &str) -> RenderResult<Self> {
        let parse_err = |message: String| RenderError::Parse {
            name: name.to_string(),
            message,
        };

        let tag = Regex::new(TAG_PATTERN).map_err(|err| parse_err(err.to_string()))?;

        // Open sections; the bottom entry is the template root
        let mut stack: Vec<(Option<Field>, Vec<Node>)> = vec![(None, Vec::new())];
        let mut last = 0;

        for caps in tag.captures_iter(source) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            if whole.start > last {
                push_node(&mut stack, Node::Text(source[last..whole.start].to_string()));
            }
            last = whole.end;

            let sigil = &caps[1];
            let field = Field::parse(&caps[2])
                .ok_or_else(|| parse_err(format!("unknown field {:?}", &caps[2])))?;
            let in_section = stack.len() > 1;

            match sigil {
                "#" => {
                    if !field.is_list() {
                        return Err(parse_err(format!("{} is not a list", field.name())));
                    }
                    if in_section {
                        return Err(parse_err("nested sections are not supported".to_string()));
                    }
                    stack.push((Some(field), Vec::new()));
                }
                "/" => match stack.pop() {
                    Some((Some(open), children)) if open == field => {
                        push_node(&mut stack, Node::Section(open, children));
                    }
                    _ => {
                        return Err(parse_err(format!("unexpected close of {}", field.name())));
                    }
                },
                _ => {
                    if field == Field::Item && !in_section {
                        return Err(parse_err("{{.}} outside of a section".to_string()));
                    }
                    if field.is_list() {
                        return Err(parse_err(format!("{} must be used as a section", field.name())));
                    }
                    push_node(&mut stack, Node::Field(field));
                }
            }
        }

        if last < source.len() {
            push_node(&mut stack, Node::Text(source[last..].to_string()));
        }

        match stack.pop() {
            Some((None, nodes)) if stack.is_empty() => Ok(Self {
                name: name.to_string(),
                nodes,
            }),
            Some((Some(open), _)) => Err(parse_err(format!("unclosed section {}", open.name()))),
            _ => Err(parse_err("unbalanced sections".to_string())),
        }
    }

    /// Execute the template against `data`
    pub fn execute(&self, data: &ViewData<'_>) -> RenderResult<Vec<u8>> {
        let mut out = String::new();
        self.write_nodes(&self.nodes, data, None, &mut out)?;
        Ok(out.into_bytes())
    }

    fn write_nodes(
        &self,
        nodes: &[Node],
        data: &ViewData<'_>,
        item: Option<&str>,
        out: &mut String,
    ) -> RenderResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Field(Field::Item) => {
                    if let Some(item) = item {
                        escape_html_into(item, out);
                    }
                }
                Node::Field(field) => {
                    let value = match (field, data) {
                        (Field::Title, ViewData::Page(page)) => page.title.clone(),
                        (Field::Body, ViewData::Page(page)) => page.body_text(),
                        _ => return Err(self.missing(*field)),
                    };
                    escape_html_into(&value, out);
                }
                Node::Section(field, children) => match (field, data) {
                    (Field::Titles, ViewData::Titles(titles)) => {
                        for title in titles.iter() {
                            self.write_nodes(children, data, Some(title), out)?;
                        }
                    }
                    _ => return Err(self.missing(*field)),
                },
            }
        }
        Ok(())
    }

    fn missing(&self, field: Field) -> RenderError {
        RenderError::MissingField {
            name: self.name.clone(),
            field: field.name().to_string(),
        }
    }
}

fn push_node(stack: &mut [(Option<Field>, Vec<Node>)], node: Node) {
    if let Some((_, nodes)) = stack.last_mut() {
        nodes.push(node);
    }
}

pub fn escape_html_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
