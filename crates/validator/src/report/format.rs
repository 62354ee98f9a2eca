//! Report text for members, conditions and existence checks
//!
//! A condition renders as `subject description operand`:
//!
//! - subject: the member, with its property before ("size of field1") or
//!   after ("field1 size") it depending on the locale
//! - description: the operator phrase, e.g. "must be greater than"
//! - operand: a literal, an interval or range, another member, or the same
//!   member of a sample object
//!
//! Grammatical categories flow from each phrase into the lookup of the next.

use crate::adapter::{Check, Rhs};
use crate::foundation::Value;
use crate::path::{Key, Marker, Member, MemberName, Quantifier};
use crate::property::Property;
use crate::report::{GrammarCategories, Locale, Phrase};

/// Renders report phrases for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'l> {
    locale: &'l Locale,
}

enum Segment<'m> {
    Key(&'m Key),
    Named(&'m MemberName),
}

impl<'l> Formatter<'l> {
    #[must_use]
    pub fn new(locale: &'l Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub fn locale(&self) -> &'l Locale {
        self.locale
    }

    /// Translates `text`, keeping it verbatim when the locale has no entry.
    #[must_use]
    pub fn phrase(&self, text: &str, grammar: GrammarCategories) -> Phrase {
        self.locale
            .translator()
            .lookup(text, grammar)
            .unwrap_or_else(|| Phrase::new(text, GrammarCategories::NONE))
    }

    fn key(&self, key: &Key, grammar: GrammarCategories) -> Phrase {
        match key {
            Key::Name(name) => self.phrase(name, grammar),
            Key::Index(index) => {
                let element = self.phrase("element", grammar);
                Phrase::new(format!("{} #{index}", element.text), element.grammar)
            }
            Key::Property(property) => self.phrase(property.name(), grammar),
            Key::Marker(Marker::All) => self.phrase("each element", grammar),
            Key::Marker(Marker::Any) => self.phrase("at least one element", grammar),
            Key::Marker(Marker::Tree(spec)) => match spec.quantifier {
                Quantifier::All => self.phrase("each node", grammar),
                Quantifier::Any => self.phrase("at least one node", grammar),
            },
            Key::Variadic(variadic) => match variadic.quantifier {
                Quantifier::All => self.phrase("each element", grammar),
                Quantifier::Any => self.phrase("at least one element", grammar),
            },
        }
    }

    /// Display-path keys grouped into named spans.
    fn segments<'m>(member: &'m Member) -> Vec<Segment<'m>> {
        let keys = member.display_path().keys();
        let mut segments = Vec::with_capacity(keys.len());
        let mut at = 0;
        while at < keys.len() {
            let span = member
                .names()
                .iter()
                .filter(|span| span.start == at && span.end.min(keys.len()) > at)
                .max_by_key(|span| span.end);
            match span {
                Some(span) => {
                    segments.push(Segment::Named(&span.name));
                    at = span.end.min(keys.len());
                }
                None => {
                    segments.push(Segment::Key(&keys[at]));
                    at += 1;
                }
            }
        }
        segments
    }

    /// The member as "innermost of ... of outermost". The phrase carries
    /// the categories of its head (innermost) word. The root member is empty.
    #[must_use]
    pub fn member(&self, member: &Member, grammar: GrammarCategories) -> Phrase {
        let mut text = String::new();
        let mut head = None;
        let mut context = grammar;
        for segment in Self::segments(member).into_iter().rev() {
            if head.is_some() {
                let of = self.phrase("of", context);
                text.push(' ');
                text.push_str(&of.text);
                text.push(' ');
                context = context.union(of.grammar);
            }
            let phrase = match segment {
                Segment::Key(key) => self.key(key, context),
                Segment::Named(name) => {
                    let mut phrase = self.phrase(&name.text, context);
                    if phrase.grammar.is_empty() {
                        phrase.grammar = name.grammar;
                    }
                    phrase
                }
            };
            text.push_str(&phrase.text);
            head.get_or_insert(phrase.grammar);
            context = phrase.grammar;
        }
        Phrase::new(text, head.unwrap_or(grammar))
    }

    /// The member with an optional property, ordered by the locale.
    #[must_use]
    pub fn subject(&self, member: &Member, property: Option<&Property>) -> Phrase {
        let property = property.filter(|p| !p.is_value());
        let Some(property) = property else {
            return self.member(member, GrammarCategories::NONE);
        };
        if member.is_root() {
            return self.phrase(property.name(), GrammarCategories::NONE);
        }
        if self.locale.property_first() {
            let head = self.phrase(property.name(), GrammarCategories::NONE);
            let of = self.phrase("of", head.grammar);
            let owner = self.member(member, head.grammar.union(of.grammar));
            Phrase::new(format!("{} {} {}", head.text, of.text, owner.text), head.grammar)
        } else {
            let owner = self.member(member, GrammarCategories::NONE);
            let head = self.phrase(property.name(), owner.grammar);
            Phrase::new(format!("{} {}", owner.text, head.text), head.grammar)
        }
    }

    fn value(&self, value: &Value, grammar: GrammarCategories) -> String {
        match value {
            Value::Interval(_) => {
                format!("{} {value}", self.phrase("interval", grammar).text)
            }
            Value::List(_) => format!("{} {value}", self.phrase("range", grammar).text),
            // literals are data, never phrase keys
            Value::Str(text) => text.to_string(),
            other => other.to_string(),
        }
    }

    fn operand(&self, check: &Check<'_>, grammar: GrammarCategories) -> String {
        match check.rhs {
            Rhs::Value(value) => self.value(value, grammar),
            Rhs::Member(other) => {
                let (other, property) = other.split_property();
                self.subject(&other, property.as_ref()).text
            }
            Rhs::Sample(_) => {
                let subject = self.subject(check.member, check.property);
                let of = self.phrase("of", subject.grammar);
                let sample = self.phrase("sample", of.grammar);
                if subject.is_empty() {
                    sample.text
                } else {
                    format!("{} {} {}", subject.text, of.text, sample.text)
                }
            }
        }
    }

    /// Text of a comparison leaf; `negated` renders the opposite condition.
    #[must_use]
    pub fn condition(&self, check: &Check<'_>, negated: bool) -> String {
        // flag properties carry their own wording: "field3 must be empty"
        if let (Some(wording), Rhs::Value(Value::Bool(expected))) = (
            check.property.and_then(Property::flag_wording),
            check.rhs,
        ) {
            if check.operator.name() == "flag" {
                let subject = self.member(check.member, GrammarCategories::NONE);
                let text = if *expected != negated {
                    &wording.set
                } else {
                    &wording.unset
                };
                let phrase = self.phrase(text, subject.grammar);
                return join([subject.text, phrase.text]);
            }
        }

        let subject = self.subject(check.member, check.property);
        let (description, show) = match check.rhs {
            Rhs::Value(value) => check.operator.describe(value, negated),
            _ => check.operator.describe(&Value::Null, negated),
        };
        let description = self.phrase(&description, subject.grammar);
        let operand = if show {
            self.operand(check, description.grammar)
        } else {
            String::new()
        };
        join([subject.text, description.text, operand])
    }

    /// Canned existence text, e.g. `field2 must exist.`
    #[must_use]
    pub fn exists(&self, member: &Member, property: Option<&Property>, expected: bool) -> String {
        let subject = self.subject(member, property);
        let text = if expected {
            "must exist."
        } else {
            "must not exist."
        };
        let phrase = self.phrase(text, subject.grammar);
        join([subject.text, phrase.text])
    }

    /// Conjunction word for aggregation text ("AND", "OR", "NOT").
    #[must_use]
    pub fn word(&self, word: &str) -> String {
        self.phrase(word, GrammarCategories::NONE).text
    }
}

fn join<const N: usize>(parts: [String; N]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::interval;
    use crate::operators::{self, Operator};
    use crate::path::{member, this};
    use crate::report::{TranslationEntry, TranslationTable};
    use pretty_assertions::assert_eq;

    fn check<'c>(
        member: &'c Member,
        property: Option<&'c Property>,
        operator: &'c dyn Operator,
        value: &'c Value,
    ) -> Check<'c> {
        Check {
            member,
            property,
            operator,
            rhs: Rhs::Value(value),
        }
    }

    #[test]
    fn member_phrases() {
        let locale = Locale::english();
        let f = Formatter::new(&locale);
        let none = GrammarCategories::NONE;
        assert_eq!(f.member(&member("field1"), none).text, "field1");
        assert_eq!(
            f.member(&member("level1").key("level2").key("level3"), none).text,
            "level3 of level2 of level1"
        );
        assert_eq!(f.member(&member("field1").index(1), none).text, "element #1 of field1");
        assert_eq!(f.member(&this(), none).text, "");
        let named = member("a").key("b").named("the total").key("c");
        assert_eq!(f.member(&named, none).text, "c of the total");
    }

    #[test]
    fn conditions_in_english() {
        let locale = Locale::english();
        let f = Formatter::new(&locale);
        let gte = operators::gte();
        let ten = Value::Int(10);
        let field1 = member("field1");
        assert_eq!(
            f.condition(&check(&field1, None, gte.as_ref(), &ten), false),
            "field1 must be greater than or equal to 10"
        );
        assert_eq!(
            f.condition(&check(&field1, Some(&Property::SIZE), gte.as_ref(), &ten), false),
            "size of field1 must be greater than or equal to 10"
        );
        let in_ = operators::in_();
        let bounds = interval(95, 100);
        assert_eq!(
            f.condition(&check(&this(), None, in_.as_ref(), &bounds), false),
            "must be in interval [95,100]"
        );
        assert_eq!(
            f.condition(&check(&field1, None, gte.as_ref(), &ten), true),
            "field1 must be less than 10"
        );
    }

    #[test]
    fn flag_wording() {
        let locale = Locale::english();
        let f = Formatter::new(&locale);
        let flag = operators::flag();
        let yes = Value::Bool(true);
        let no = Value::Bool(false);
        let field3 = member("field3");
        let empty = Some(&Property::EMPTY);
        assert_eq!(
            f.condition(&check(&field3, empty, flag.as_ref(), &yes), false),
            "field3 must be empty"
        );
        assert_eq!(
            f.condition(&check(&field3, empty, flag.as_ref(), &no), false),
            "field3 must not be empty"
        );
        assert_eq!(
            f.condition(&check(&field3, empty, flag.as_ref(), &yes), true),
            "field3 must not be empty"
        );
    }

    #[test]
    fn member_before_property_with_agreement() {
        let table = TranslationTable::new()
            .with_entry(
                "size",
                TranslationEntry {
                    text: "Größe".into(),
                    grammar: GrammarCategories::FEMININE,
                    ..TranslationEntry::default()
                },
            )
            .with_entry(
                "must be greater than",
                TranslationEntry {
                    text: "muss größer sein als".into(),
                    ..TranslationEntry::default()
                },
            )
            .with_entry(
                "must be greater than",
                TranslationEntry {
                    text: "muss größer sein als (f)".into(),
                    requires: GrammarCategories::FEMININE,
                    ..TranslationEntry::default()
                },
            );
        let locale = Locale::new("de", table).with_property_first(false);
        let f = Formatter::new(&locale);
        let gt = operators::gt();
        let three = Value::Int(3);
        let field = member("feld");
        assert_eq!(
            f.condition(&check(&field, Some(&Property::SIZE), gt.as_ref(), &three), false),
            "feld Größe muss größer sein als (f) 3"
        );
        assert_eq!(
            f.condition(&check(&field, None, gt.as_ref(), &three), false),
            "feld muss größer sein als 3"
        );
    }

    #[test]
    fn string_operands_are_not_translated() {
        let table = TranslationTable::new()
            .with("and", "et")
            .with("must be equal to", "doit être égal à");
        let locale = Locale::new("fr", table);
        let f = Formatter::new(&locale);
        let eq = operators::eq();
        let word = Value::str("and");
        let field = member("mot");
        assert_eq!(
            f.condition(&check(&field, None, eq.as_ref(), &word), false),
            "mot doit être égal à and"
        );
    }

    #[test]
    fn exists_text() {
        let locale = Locale::english();
        let f = Formatter::new(&locale);
        assert_eq!(f.exists(&member("field2"), None, true), "field2 must exist.");
        assert_eq!(
            f.exists(&member("field2"), Some(&Property::SIZE), false),
            "size of field2 must not exist."
        );
    }
}
