//! Entity: チャット全体の状態
//!
//! ゲスト番号カウンタ、接続ごとの表示名、使用中の名前、接続ごとの現在のルーム、
//! ルームごとのメンバー（参加順）を 1 つの構造体で保持します。
//!
//! 各メソッドは状態を更新したうえで「誰に何を届けるべきか」を返すだけで、
//! 実際の送信は行いません（送信は UseCase 層が MessagePusher を使って行う）。

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{
    error::{ChatStateError, RenameError},
    value_object::{ConnectionId, DisplayName, RoomName},
};

/// ルームへの参加結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 参加したルーム
    pub room: RoomName,
    /// 他のメンバーへ送る `"<name> has joined <room>."`
    pub joined_notice: String,
    /// 参加者本人を除く、ルームの既存メンバー
    pub notify_targets: Vec<ConnectionId>,
    /// 他のメンバーがいる場合に本人へ送る `"Users currently in <room>: A, B."`
    pub members_summary: Option<String>,
}

/// 接続時の結果（ゲスト名の割り当てと Lobby への参加）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOutcome {
    pub name: DisplayName,
    pub join: JoinOutcome,
}

/// 名前変更に成功した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub previous_name: DisplayName,
    pub name: DisplayName,
    /// `"<previous> is now known as <name>."`
    pub notice: String,
    /// 現在のルームの、本人以外のメンバー
    pub notify_targets: Vec<ConnectionId>,
}

/// チャットメッセージの配送内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// `"<sender>: <text>"`
    pub text: String,
    pub targets: Vec<ConnectionId>,
}

/// 切断時に解放されたもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    pub name: DisplayName,
    pub room: Option<RoomName>,
}

/// ルーム一覧の 1 要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    /// 参加順の表示名
    pub members: Vec<DisplayName>,
}

/// チャット全体の状態
///
/// ## 不変条件
///
/// - `names` のキーと、ルームに所属している接続は一致する（参加前の瞬間を除く）
/// - `names_used` は `names` の値の集合と一致する
/// - `current_room[id] == room` ⇔ `rooms[room]` が `id` を含む
/// - メンバーが 0 人のルームは `rooms` に残らない
#[derive(Debug, Clone)]
pub struct ChatState {
    next_guest_number: u64,
    names: HashMap<ConnectionId, DisplayName>,
    names_used: HashSet<DisplayName>,
    current_room: HashMap<ConnectionId, RoomName>,
    rooms: BTreeMap<RoomName, Vec<ConnectionId>>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// 空の状態を作成（ゲスト番号は 1 から始まる）
    pub fn new() -> Self {
        Self {
            next_guest_number: 1,
            names: HashMap::new(),
            names_used: HashSet::new(),
            current_room: HashMap::new(),
            rooms: BTreeMap::new(),
        }
    }

    /// 新しい接続にゲスト名を割り当て、Lobby に参加させる
    ///
    /// ゲスト番号は切断があっても戻らない。
    pub fn connect(&mut self, connection_id: ConnectionId) -> ConnectOutcome {
        let name = DisplayName::guest(self.next_guest_number);
        self.next_guest_number += 1;

        self.names.insert(connection_id, name.clone());
        self.names_used.insert(name.clone());

        let join = self.join(connection_id, &name, RoomName::lobby());
        ConnectOutcome { name, join }
    }

    /// 現在のルームを抜けて `room` に参加する
    ///
    /// 同じルームを指定した場合も通常の移動として扱い、参加通知が再送される。
    pub fn switch_room(
        &mut self,
        connection_id: ConnectionId,
        room: RoomName,
    ) -> Result<JoinOutcome, ChatStateError> {
        let name = self.require_name(connection_id)?.clone();
        self.leave(connection_id);
        Ok(self.join(connection_id, &name, room))
    }

    /// 表示名の変更を試みる
    ///
    /// 判定順: 予約済み接頭辞 → 使用中の名前。
    /// 自分の現在の名前も「使用中」として拒否される。
    pub fn rename(
        &mut self,
        connection_id: ConnectionId,
        requested: DisplayName,
    ) -> Result<RenameOutcome, ChatStateError> {
        let previous_name = self.require_name(connection_id)?.clone();

        if requested.has_reserved_prefix() {
            return Err(RenameError::ReservedPrefix.into());
        }
        if self.names_used.contains(&requested) {
            return Err(RenameError::NameInUse.into());
        }

        self.names_used.insert(requested.clone());
        self.names.insert(connection_id, requested.clone());
        self.names_used.remove(&previous_name);

        let notify_targets = match self.current_room.get(&connection_id) {
            Some(room) => self.members_except(room, connection_id),
            None => Vec::new(),
        };

        Ok(RenameOutcome {
            notice: format!("{previous_name} is now known as {requested}."),
            previous_name,
            name: requested,
            notify_targets,
        })
    }

    /// `room` のメンバー（送信者を除く）へ届けるチャット行を組み立てる
    ///
    /// 送信者が `room` に参加しているかは確認しない。存在しないルームなら配送先は空。
    pub fn send_message(
        &self,
        connection_id: ConnectionId,
        room: &RoomName,
        text: &str,
    ) -> Result<ChatLine, ChatStateError> {
        let sender = self.require_name(connection_id)?;
        Ok(ChatLine {
            text: format!("{sender}: {text}"),
            targets: self.members_except(room, connection_id),
        })
    }

    /// 接続を解放する（名前・所属ルームをすべて削除）
    pub fn disconnect(
        &mut self,
        connection_id: ConnectionId,
    ) -> Result<DisconnectOutcome, ChatStateError> {
        let name = self
            .names
            .remove(&connection_id)
            .ok_or(ChatStateError::ConnectionNotFound(connection_id))?;
        self.names_used.remove(&name);
        let room = self.leave(connection_id);

        Ok(DisconnectOutcome { name, room })
    }

    /// アクティブなルームとメンバーの一覧（ルーム名順）
    pub fn rooms(&self) -> Vec<RoomSummary> {
        self.rooms
            .iter()
            .map(|(room, members)| RoomSummary {
                name: room.clone(),
                members: members
                    .iter()
                    .filter_map(|id| self.names.get(id).cloned())
                    .collect(),
            })
            .collect()
    }

    pub fn display_name(&self, connection_id: ConnectionId) -> Option<&DisplayName> {
        self.names.get(&connection_id)
    }

    pub fn current_room(&self, connection_id: ConnectionId) -> Option<&RoomName> {
        self.current_room.get(&connection_id)
    }

    pub fn is_name_used(&self, name: &DisplayName) -> bool {
        self.names_used.contains(name)
    }

    pub fn connection_count(&self) -> usize {
        self.names.len()
    }

    fn require_name(&self, connection_id: ConnectionId) -> Result<&DisplayName, ChatStateError> {
        self.names
            .get(&connection_id)
            .ok_or(ChatStateError::ConnectionNotFound(connection_id))
    }

    fn join(
        &mut self,
        connection_id: ConnectionId,
        name: &DisplayName,
        room: RoomName,
    ) -> JoinOutcome {
        self.rooms
            .entry(room.clone())
            .or_default()
            .push(connection_id);
        self.current_room.insert(connection_id, room.clone());

        let notify_targets = self.members_except(&room, connection_id);
        let members_summary = if notify_targets.is_empty() {
            None
        } else {
            let others: Vec<&str> = notify_targets
                .iter()
                .filter_map(|id| self.names.get(id))
                .map(DisplayName::as_str)
                .collect();
            Some(format!("Users currently in {room}: {}.", others.join(", ")))
        };

        JoinOutcome {
            joined_notice: format!("{name} has joined {room}."),
            room,
            notify_targets,
            members_summary,
        }
    }

    /// 現在のルームから抜ける。空になったルームは削除する。
    fn leave(&mut self, connection_id: ConnectionId) -> Option<RoomName> {
        let room = self.current_room.remove(&connection_id)?;
        if let Some(members) = self.rooms.get_mut(&room) {
            members.retain(|id| *id != connection_id);
            if members.is_empty() {
                self.rooms.remove(&room);
            }
        }
        Some(room)
    }

    fn members_except(&self, room: &RoomName, exclude: ConnectionId) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|id| *id != exclude)
                    .collect()
            })
            .unwrap_or_default()
    }
}
