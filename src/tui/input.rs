use crate::config::{MAX_BPM, MIN_BPM};
use crate::event_loop::{EngineMessage, TransportAction};
use crate::state::Tempo;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

const COARSE_STEP: i32 = 10;

pub fn map_key_event(key: KeyEvent) -> Option<EngineMessage> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            Some(EngineMessage::TransportCommand(TransportAction::Toggle))
        }
        KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(EngineMessage::NudgeTempo(1))
        }
        KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => Some(EngineMessage::NudgeTempo(-1)),
        KeyCode::PageUp => Some(EngineMessage::NudgeTempo(COARSE_STEP)),
        KeyCode::PageDown => Some(EngineMessage::NudgeTempo(-COARSE_STEP)),
        KeyCode::Home => Tempo::new(MIN_BPM).map(EngineMessage::SetTempo),
        KeyCode::End => Tempo::new(MAX_BPM).map(EngineMessage::SetTempo),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(EngineMessage::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    #[test]
    fn test_space_toggles_transport() {
        let key_event = KeyEvent::from(KeyCode::Char(' '));
        match map_key_event(key_event) {
            Some(EngineMessage::TransportCommand(TransportAction::Toggle)) => {}
            _ => panic!("Expected Toggle command for Space key"),
        }
    }

    #[test]
    fn test_arrows_nudge_tempo() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            Some(EngineMessage::NudgeTempo(1))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(EngineMessage::NudgeTempo(-1))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::PageDown)),
            Some(EngineMessage::NudgeTempo(-10))
        );
    }

    #[test]
    fn test_home_and_end_jump_to_bounds() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::End)),
            Some(EngineMessage::SetTempo(Tempo::new(240).unwrap()))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Home)),
            Some(EngineMessage::SetTempo(Tempo::new(60).unwrap()))
        );
    }

    #[test]
    fn test_q_quits() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(EngineMessage::Quit)
        );
    }

    #[test]
    fn test_other_key_returns_none() {
        let key_event = KeyEvent::from(KeyCode::Char('x'));
        assert!(map_key_event(key_event).is_none());
    }
}
