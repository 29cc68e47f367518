//! Line-oriented command interpreter standing in for the chat transport.
//!
//! Each input line maps onto one engine operation. Replies keep the
//! public/private split the engine produces, so the REPL can show refusals
//! differently from broadcast messages.

use tracing::warn;

use oracle_engine::{
    Announcement, DrawKind, ParticipantId, Reply, SharedEngine, WeeklySchedule,
};

/// An interactive game console bound to one engine.
pub struct Console {
    engine: SharedEngine,
    schedule: Option<WeeklySchedule>,
}

impl Console {
    /// Create a console. With a schedule, `tick` advances cycles automatically.
    pub fn new(engine: SharedEngine, schedule: Option<WeeklySchedule>) -> Self {
        Self { engine, schedule }
    }

    /// Poll the weekly schedule, if any.
    pub fn tick(&mut self) -> Option<Announcement> {
        let schedule = self.schedule.as_mut()?;
        self.engine.advance_if_due(schedule)
    }

    /// Process a line of input and return the reply.
    pub fn process(&mut self, input: &str) -> Reply {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Reply::Private(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "draw" => self.do_draw(DrawKind::Standard, rest),
            "boost" => self.do_draw(DrawKind::Boosted, rest),
            "bonus" => self.do_draw(DrawKind::Bonus, rest),
            "check" => self.do_check(rest),
            "reset" => self.do_reset(rest),
            "summary" => Reply::Private(self.engine.summary().to_string()),
            "status" => self.do_status(),
            "channel" => self.do_channel(),
            "help" => Reply::Private(HELP.to_string()),
            "quit" | "q" => Reply::Private("Goodbye!".to_string()),
            other => {
                warn!(command = other, "unknown console command");
                Reply::Private(format!("unknown command '{other}', type 'help'"))
            }
        }
    }

    fn do_draw(&self, kind: DrawKind, rest: &str) -> Reply {
        let Some((id, name)) = parse_participant(rest) else {
            return Reply::Private(format!(
                "usage: {} <id> [display name]",
                command_for(kind)
            ));
        };
        self.engine.draw_reply(&id, name, kind)
    }

    fn do_check(&self, rest: &str) -> Reply {
        let mut words = rest.split_whitespace();
        let (Some(id), Some(kind)) = (words.next(), words.next().and_then(DrawKind::parse)) else {
            return Reply::Private("usage: check <id> <standard|boosted|bonus>".to_string());
        };
        match self.engine.check_eligibility(&ParticipantId::from(id), kind) {
            Ok(()) => Reply::Private(format!("{id} may make a {kind} draw.")),
            Err(reason) => Reply::Private(reason.to_string()),
        }
    }

    fn do_reset(&self, target: &str) -> Reply {
        if target.is_empty() {
            return Reply::Public(self.engine.advance_cycle().to_string());
        }
        match self.engine.advance_cycle_to(target) {
            Ok(announcement) => Reply::Public(announcement.to_string()),
            Err(e) => Reply::Private(e.to_string()),
        }
    }

    fn do_status(&self) -> Reply {
        let cycle = self.engine.cycle();
        let participants = self.engine.with(|e| e.ledger().len());
        let mut out = format!("Cycle: {} ({})\n", cycle.cycle_index, cycle.phase());
        match cycle.last_reset_time {
            Some(at) => out.push_str(&format!(
                "Last reset: {}\n",
                at.format("%Y-%m-%d %H:%M UTC")
            )),
            None => out.push_str("Last reset: never\n"),
        }
        out.push_str(&format!("Participants: {participants}"));
        Reply::Private(out)
    }

    fn do_channel(&self) -> Reply {
        match self.engine.recommend_channel() {
            Some(ch) => Reply::Public(format!(
                "🎲 **Recommended channel of the day**\n\n✨ Today it's **channel {ch}**"
            )),
            None => Reply::Private("no channels available".to_string()),
        }
    }
}

/// Split `<id> [display name]`; the name defaults to the id.
fn parse_participant(rest: &str) -> Option<(ParticipantId, &str)> {
    let mut parts = rest.splitn(2, ' ');
    let id = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().map(str::trim).filter(|s| !s.is_empty()).unwrap_or(id);
    Some((ParticipantId::from(id), name))
}

fn command_for(kind: DrawKind) -> &'static str {
    match kind {
        DrawKind::Standard => "draw",
        DrawKind::Boosted => "boost",
        DrawKind::Bonus => "bonus",
    }
}

const HELP: &str = "\
Oracle Commands:
  draw <id> [name]              Standard draw (once per day)
  boost <id> [name]             Boosted draw, doubled odds (once per week, uses the daily draw)
  bonus <id> [name]             Bonus draw, once after each standard/boosted draw
  check <id> <kind>             Check whether a draw kind is available

Operator Commands:
  reset [effect]                Start a new cycle (random or chosen oracle)
  summary                       Show the oracle and participation summary
  status                        Show cycle status
  channel                       Recommend a channel for today
  help                          Show this help
  quit                          Exit";
