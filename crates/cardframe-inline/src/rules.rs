//! Stylesheet parsing for the inliner.
//!
//! The parser is built on `cssparser` and accepts the subset of CSS the
//! inliner can apply: rules whose selectors are class selectors (optionally
//! comma-separated). Anything else is rejected so a stylesheet the inliner
//! cannot fully honor fails loudly instead of half-applying.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};

use crate::InlineError;

/// A single `property: value` pair, with the value kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Declaration {
    pub(crate) property: String,
    pub(crate) value: String,
}

/// One class-selector rule: `.a, .b { ... }`.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub(crate) classes: Vec<String>,
    pub(crate) declarations: Vec<Declaration>,
}

impl Rule {
    pub(crate) fn matches(&self, element_classes: &[&str]) -> bool {
        self.classes
            .iter()
            .any(|class| element_classes.contains(&class.as_str()))
    }

    /// The rule body as inline-style text: `margin: 0; padding: 0`.
    pub(crate) fn style_text(&self) -> String {
        self.declarations
            .iter()
            .map(|decl| format!("{}: {}", decl.property, decl.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

pub(crate) fn parse_rules(css: &str) -> Result<Vec<Rule>, InlineError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let mut rule_parser = RuleListParser { rules: Vec::new() };
    for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
        if let Err((error, slice)) = result {
            return Err(InlineError::Stylesheet {
                near: slice.trim().to_string(),
                message: format!("{error:?}"),
            });
        }
    }

    Ok(rule_parser.rules)
}

struct RuleListParser {
    rules: Vec<Rule>,
}

impl<'i> QualifiedRuleParser<'i> for RuleListParser {
    type Prelude = Vec<String>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut classes = Vec::new();

        loop {
            match input.next() {
                Ok(Token::Delim('.')) => {
                    let name = input.expect_ident()?;
                    classes.push(name.as_ref().to_string());
                }
                Ok(Token::Comma) => continue,
                // Element, descendant, and every other selector form is out
                // of contract for an inliner keyed on class attributes.
                Ok(_) => return Err(input.new_custom_error(())),
                Err(_) => break,
            }
        }

        if classes.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(classes)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = DeclarationListParser;
        let mut declarations = Vec::new();

        for result in RuleBodyParser::new(input, &mut decl_parser) {
            match result {
                Ok(declaration) => declarations.push(declaration),
                Err((error, _slice)) => return Err(error),
            }
        }

        self.rules.push(Rule {
            classes: prelude,
            declarations,
        });
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for RuleListParser {
    type Prelude = ();
    type AtRule = ();
    type Error = ();
}

struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // Capture the value as raw source text rather than re-serializing
        // tokens, so quoting and spacing survive into the style attribute.
        let start = input.position();
        consume_component_values(input);
        let value = input.slice_from(start).trim().to_string();

        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(Declaration {
            property: name.as_ref().to_string(),
            value,
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

fn consume_component_values(input: &mut Parser<'_, '_>) {
    loop {
        match input.next() {
            Ok(Token::Function(_))
            | Ok(Token::ParenthesisBlock)
            | Ok(Token::SquareBracketBlock)
            | Ok(Token::CurlyBracketBlock) => {
                let _ = input.parse_nested_block(consume_nested_block);
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }
}

fn consume_nested_block<'i, 't>(input: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, ()>> {
    consume_component_values(input);
    Ok(())
}
