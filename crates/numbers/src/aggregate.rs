//! Segmentation and aggregation shared by the locale parsers
//!
//! A token stream is cut into independent numeral groups by replaying it
//! through a [`GroupAccumulator`]: the first token an accumulator refuses
//! starts the next group. A refused multiplier takes the unit right before
//! it along ("two hundred three hundred" is 200 and 300, not 203 and 100).
//! Each group is then resolved to an integer and the decimal strings are
//! concatenated in the language's reading order.

use crate::token::{Token, TokenKind};

/// Order in which resolved groups are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadingOrder {
    /// Groups are resolved last to first and prepended
    RightToLeft,
    /// Groups are appended as they are resolved
    LeftToRight,
}

/// When a connector word keeps the current group open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnectorRule {
    /// Whenever a number token follows ("one hundred and twenty")
    BeforeNumber,
    /// Only when a 1-9 unit follows ("treinta y dos")
    BeforeUnit,
}

pub(crate) trait GroupAccumulator {
    /// `Some(true)` if the token joins the group, `Some(false)` if it must
    /// start a new one, `None` on overflow.
    fn push(&mut self, token: &Token, next: Option<&Token>) -> Option<bool>;

    /// Whether `token` scales the value accumulated before it
    fn is_multiplier(&self, token: &Token) -> bool;

    /// Integer value of everything pushed so far
    fn finish(&self) -> Option<u64>;
}

/// Run the segmentation and aggregation stages over a token stream
pub(crate) fn resolve<A, F>(tokens: &[Token], new_group: F, order: ReadingOrder) -> Option<String>
where
    A: GroupAccumulator,
    F: Fn() -> A,
{
    // A connector links two numbers; leading or alone it is not a number
    if tokens.first().map_or(true, Token::is_connector) {
        return None;
    }

    let groups = segment(tokens, &new_group)?;
    if groups.is_empty() {
        return None;
    }

    let mut rendered = String::new();
    match order {
        ReadingOrder::RightToLeft => {
            for group in groups.iter().rev() {
                rendered.insert_str(0, &render_group(group, &new_group)?);
            }
        }
        ReadingOrder::LeftToRight => {
            for group in &groups {
                rendered.push_str(&render_group(group, &new_group)?);
            }
        }
    }
    Some(rendered)
}

pub(crate) fn segment<A, F>(tokens: &[Token], new_group: &F) -> Option<Vec<Vec<Token>>>
where
    A: GroupAccumulator,
    F: Fn() -> A,
{
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut acc = new_group();

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);
        if acc.push(token, next)? {
            current.push(*token);
            continue;
        }

        if let Some(carried) = carry_multiplicand(&mut current, token, next, new_group)? {
            close_group(&mut groups, std::mem::take(&mut current));
            (acc, current) = carried;
            continue;
        }

        close_group(&mut groups, std::mem::take(&mut current));
        acc = new_group();
        // A connector cannot open a group and is dropped
        if acc.push(token, next)? {
            current.push(*token);
        }
    }

    close_group(&mut groups, current);
    Some(groups)
}

/// When `token` is a multiplier the current group refused, move the plain
/// number in front of it into a new group with it. Returns the new group and
/// its accumulator, or `None` when nothing can be carried.
fn carry_multiplicand<A, F>(
    current: &mut Vec<Token>,
    token: &Token,
    next: Option<&Token>,
    new_group: &F,
) -> Option<Option<(A, Vec<Token>)>>
where
    A: GroupAccumulator,
    F: Fn() -> A,
{
    let mut acc = new_group();
    let Some(&last) = current.last() else {
        return Some(None);
    };
    if current.len() < 2
        || !acc.is_multiplier(token)
        || last.is_connector()
        || acc.is_multiplier(&last)
    {
        return Some(None);
    }
    if !acc.push(&last, Some(token))? || !acc.push(token, next)? {
        return Some(None);
    }

    current.pop();
    Some(Some((acc, vec![last, *token])))
}

/// Trailing connectors never bind to anything and are dropped
fn close_group(groups: &mut Vec<Vec<Token>>, mut group: Vec<Token>) {
    while group.last().is_some_and(Token::is_connector) {
        group.pop();
    }
    if !group.is_empty() {
        groups.push(group);
    }
}

fn render_group<A, F>(group: &[Token], new_group: &F) -> Option<String>
where
    A: GroupAccumulator,
    F: Fn() -> A,
{
    if let [token] = group {
        if token.kind == TokenKind::Explicit {
            return Some(format!("{:0width$}", token.value, width = token.width()));
        }
    }

    let mut acc = new_group();
    for (i, token) in group.iter().enumerate() {
        if !acc.push(token, group.get(i + 1))? {
            return None;
        }
    }
    acc.finish().map(|value| value.to_string())
}

/// Two "ten" words within two positions of each other cannot be resolved
/// ("ten ten" might be twenty or one thousand and ten).
pub(crate) fn has_ambiguous_tens(tokens: &[Token]) -> bool {
    let tens: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == TokenKind::Number && t.value == 10)
        .map(|(i, _)| i)
        .collect();
    tens.windows(2).any(|pair| pair[1] - pair[0] <= 2)
}

/// Multiplicative-additive grammar of English, Spanish and French
#[derive(Debug)]
pub(crate) struct WesternGroup {
    connectors: ConnectorRule,
    total: u64,
    current: u64,
    mask: u32,
    scale: u64,
    started: bool,
}

impl WesternGroup {
    pub(crate) fn new(connectors: ConnectorRule) -> Self {
        Self {
            connectors,
            total: 0,
            current: 0,
            mask: 0,
            scale: 0,
            started: false,
        }
    }

    fn add(&mut self, token: &Token) -> Option<bool> {
        if self.mask & token.digit_mask != 0 {
            return Some(false);
        }
        self.current = self.current.checked_add(token.value)?;
        self.mask |= token.digit_mask;
        self.started = true;
        Some(true)
    }

    fn multiply(&mut self, token: &Token) -> Option<bool> {
        let base = if self.current == 0 { 1 } else { self.current };

        if token.value < 1_000 {
            // "hundred" scales whatever sits below the hundreds
            let position = token.position();
            if self.mask >> position != 0 {
                return Some(false);
            }
            self.current = base.checked_mul(token.value)?;
            self.mask = 1 << position;
        } else {
            if self.scale != 0 && token.value >= self.scale {
                return Some(false);
            }
            self.total = self.total.checked_add(base.checked_mul(token.value)?)?;
            self.current = 0;
            self.mask = 0;
            self.scale = token.value;
        }

        self.started = true;
        Some(true)
    }
}

impl GroupAccumulator for WesternGroup {
    fn push(&mut self, token: &Token, next: Option<&Token>) -> Option<bool> {
        match token.kind {
            TokenKind::Connector => Some(
                self.started
                    && match self.connectors {
                        ConnectorRule::BeforeNumber => next.is_some_and(|n| !n.is_connector()),
                        ConnectorRule::BeforeUnit => next.is_some_and(Token::is_unit),
                    },
            ),
            _ if self.is_multiplier(token) => self.multiply(token),
            _ => self.add(token),
        }
    }

    fn is_multiplier(&self, token: &Token) -> bool {
        token.is_power_of_ten(100)
    }

    fn finish(&self) -> Option<u64> {
        self.total.checked_add(self.current)
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    value: u64,
    mask: u32,
    after_multiplier: bool,
}

/// Positional grammar of Japanese and Chinese.
///
/// Small multipliers (十 百 千) build a section, large ones (万 億 兆) fold
/// the section into the total. A unit waits in `pending` until a multiplier
/// claims it or the group ends.
#[derive(Debug)]
pub(crate) struct CjkGroup {
    abbreviate: bool,
    total: u64,
    section: u64,
    section_mask: u32,
    pending: Option<Pending>,
    last_multiplier: u64,
    last_large: u64,
    previous_was_multiplier: bool,
}

impl CjkGroup {
    /// `abbreviate` enables the Chinese reading of a trailing unit after a
    /// multiplier as the next lower position (两百五 = 250).
    pub(crate) fn new(abbreviate: bool) -> Self {
        Self {
            abbreviate,
            total: 0,
            section: 0,
            section_mask: 0,
            pending: None,
            last_multiplier: 0,
            last_large: 0,
            previous_was_multiplier: false,
        }
    }

    fn started(&self) -> bool {
        self.pending.is_some() || self.section_mask != 0 || self.last_large != 0
    }

    fn number(&mut self, token: &Token) -> Option<bool> {
        if token.digit_mask & self.section_mask != 0 {
            return Some(false);
        }
        if let Some(pending) = self.pending {
            // さんびゃく + ご: commit the larger pending value first
            if pending.mask & token.digit_mask != 0 || pending.mask < token.digit_mask {
                return Some(false);
            }
            self.section = self.section.checked_add(pending.value)?;
            self.section_mask |= pending.mask;
        }

        self.pending = Some(Pending {
            value: token.value,
            mask: token.digit_mask,
            after_multiplier: self.previous_was_multiplier,
        });
        self.previous_was_multiplier = false;
        Some(true)
    }

    fn multiply(&mut self, token: &Token) -> Option<bool> {
        let multiplier = token.value;

        if multiplier < 10_000 {
            let position = token.position();
            let lower = (1u32 << (position + 1)) - 1;
            if self.section_mask & lower != 0 {
                return Some(false);
            }
            let base = self.pending.map_or(1, |p| p.value);
            self.section = self.section.checked_add(base.checked_mul(multiplier)?)?;
            self.section_mask |= 1 << position;
        } else {
            if self.last_large != 0 && multiplier >= self.last_large {
                return Some(false);
            }
            let mut value = self.section.checked_add(self.pending.map_or(0, |p| p.value))?;
            if value == 0 {
                value = 1;
            }
            self.total = self.total.checked_add(value.checked_mul(multiplier)?)?;
            self.section = 0;
            self.section_mask = 0;
            self.last_large = multiplier;
        }

        self.pending = None;
        self.last_multiplier = multiplier;
        self.previous_was_multiplier = true;
        Some(true)
    }
}

impl GroupAccumulator for CjkGroup {
    fn push(&mut self, token: &Token, _next: Option<&Token>) -> Option<bool> {
        match token.kind {
            TokenKind::Connector => {
                self.previous_was_multiplier = false;
                Some(self.started())
            }
            _ if self.is_multiplier(token) => self.multiply(token),
            _ => self.number(token),
        }
    }

    fn is_multiplier(&self, token: &Token) -> bool {
        token.is_power_of_ten(10)
    }

    fn finish(&self) -> Option<u64> {
        let mut value = self.total.checked_add(self.section)?;
        if let Some(pending) = self.pending {
            let tail = if self.abbreviate
                && pending.after_multiplier
                && pending.value < 10
                && self.last_multiplier >= 10
            {
                pending.value.checked_mul(self.last_multiplier / 10)?
            } else {
                pending.value
            };
            value = value.checked_add(tail)?;
        }
        Some(value)
    }
}
