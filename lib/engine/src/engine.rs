/* 点击驱动的对局控制：把界面上的两次点击（起点、终点）转换成走子 */
use tracing::{debug, info};

use crate::board::{Position, Side};
use crate::rules::{GameState, MoveOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    AwaitingSource,
    AwaitingDestination { from: Position, targets: Vec<Position> },
    // 连吃中，起点固定为刚落下的棋子
    ChainAwaitingDestination { from: Position, targets: Vec<Position> },
}

/// What a single click did, for the presentation layer to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickEvent {
    Ignored,
    Selected { from: Position, targets: Vec<Position> },
    Cancelled { from: Position, clicked: Position },
    Moved(MoveOutcome),
    ChainForfeited { side: Side },
    GameOver { winner: Side, last: MoveOutcome },
}

pub struct Controller {
    state: GameState,
    selection: Selection,
}

impl Controller {
    pub fn new(state: GameState) -> Self {
        Controller {
            state,
            selection: Selection::AwaitingSource,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Squares to highlight: the legal targets of the pending selection.
    pub fn highlighted(&self) -> &[Position] {
        match &self.selection {
            Selection::AwaitingSource => &[],
            Selection::AwaitingDestination { targets, .. }
            | Selection::ChainAwaitingDestination { targets, .. } => targets,
        }
    }

    pub fn selected(&self) -> Option<Position> {
        match self.selection {
            Selection::AwaitingSource => None,
            Selection::AwaitingDestination { from, .. }
            | Selection::ChainAwaitingDestination { from, .. } => Some(from),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    pub fn click(&mut self, pos: Position) -> ClickEvent {
        if self.winner().is_some() {
            return ClickEvent::Ignored;
        }
        match std::mem::replace(&mut self.selection, Selection::AwaitingSource) {
            Selection::AwaitingSource => self.select(pos),
            Selection::AwaitingDestination { from, targets }
            | Selection::ChainAwaitingDestination { from, targets } => {
                if targets.contains(&pos) {
                    self.move_to(from, pos)
                } else {
                    // 点到别处就取消这次选择
                    debug!(%from, clicked = %pos, "pending move cancelled");
                    ClickEvent::Cancelled { from, clicked: pos }
                }
            }
        }
    }

    fn select(&mut self, pos: Position) -> ClickEvent {
        let Some(piece) = self.state.board.get(pos) else {
            return ClickEvent::Ignored;
        };
        if !piece.belong_to(self.state.turn) {
            return ClickEvent::Ignored;
        }

        let targets = self.state.legal_destinations(pos);
        if !targets.is_empty() {
            self.selection = if self.state.chain == Some(pos) {
                Selection::ChainAwaitingDestination {
                    from: pos,
                    targets: targets.clone(),
                }
            } else {
                Selection::AwaitingDestination {
                    from: pos,
                    targets: targets.clone(),
                }
            };
            return ClickEvent::Selected { from: pos, targets };
        }

        // 连吃中选了不能动的棋子，视为放弃连吃，轮到对方
        if self.state.chain.is_some() {
            let side = self.state.turn;
            self.state = self.state.forfeit_chain();
            return ClickEvent::ChainForfeited { side };
        }
        ClickEvent::Ignored
    }

    fn move_to(&mut self, from: Position, to: Position) -> ClickEvent {
        let (next, outcome) = match self.state.apply_move(from, to) {
            Ok(applied) => applied,
            Err(err) => {
                debug!(%err, "move rejected");
                return ClickEvent::Cancelled { from, clicked: to };
            }
        };
        self.state = next;

        if outcome.chain_continues {
            self.selection = Selection::ChainAwaitingDestination {
                from: to,
                targets: self.state.legal_destinations(to),
            };
            return ClickEvent::Moved(outcome);
        }

        // 一步完整走完才判断胜负
        if let Some(winner) = self.state.winner() {
            info!(%winner, "game over");
            return ClickEvent::GameOver {
                winner,
                last: outcome,
            };
        }
        ClickEvent::Moved(outcome)
    }
}
