//! Tests for the object model and its tagged unions.

use super::*;
use courier_core::error::CourierError;
use courier_core::tagged::TaggedUnion;

fn user(id: i64) -> User {
    User {
        id,
        is_bot: false,
        first_name: "Ada".into(),
        last_name: None,
        username: Some("ada".into()),
        language_code: None,
        is_premium: None,
    }
}

fn chat(id: i64, chat_type: &str) -> Chat {
    Chat {
        id,
        chat_type: chat_type.into(),
        title: None,
        username: None,
        first_name: None,
        last_name: None,
        is_forum: None,
    }
}

fn document() -> Document {
    Document {
        file_id: "doc".into(),
        file_unique_id: "udoc".into(),
        file_name: None,
        mime_type: Some("image/png".into()),
        file_size: None,
    }
}

/// Encode then decode through a JSON string; the value must survive intact
/// and carry the expected discriminator.
fn assert_round_trip<U>(value: U)
where
    U: TaggedUnion + serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let encoded = serde_json::to_string(&value).unwrap();
    let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(json[U::TAG_FIELD], value.tag(), "discriminator in {encoded}");
    let decoded: U = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_chat_group_detection() {
    let group: Chat = serde_json::from_str(r#"{"id": -100123, "type": "group"}"#).unwrap();
    let supergroup: Chat =
        serde_json::from_str(r#"{"id": -100456, "type": "supergroup"}"#).unwrap();
    let private: Chat = serde_json::from_str(r#"{"id": 789, "type": "private"}"#).unwrap();
    assert!(group.is_group());
    assert!(supergroup.is_group());
    assert!(!private.is_group());
}

#[test]
fn test_chat_type_defaults_when_missing() {
    let chat: Chat = serde_json::from_str(r#"{"id": 123}"#).unwrap();
    assert_eq!(chat.chat_type, "");
    assert!(!chat.is_group());
}

#[test]
fn test_user_display_name() {
    let mut u = user(1);
    assert_eq!(u.display_name(), "@ada");
    u.username = None;
    u.last_name = Some("Lovelace".into());
    assert_eq!(u.display_name(), "Ada Lovelace");
    u.last_name = None;
    assert_eq!(u.display_name(), "Ada");
}

#[test]
fn test_message_origin_variants() {
    let json = r#"{"type": "hidden_user", "date": 10, "sender_user_name": "ghost"}"#;
    let origin: MessageOrigin = serde_json::from_str(json).unwrap();
    assert_eq!(
        origin,
        MessageOrigin::HiddenUser(MessageOriginHiddenUser {
            date: 10,
            sender_user_name: "ghost".into(),
        })
    );
    assert_eq!(origin.date(), 10);

    let json = r#"{
        "date": 11,
        "chat": {"id": -1001, "type": "channel", "title": "news"},
        "message_id": 77,
        "type": "channel"
    }"#;
    let origin: MessageOrigin = serde_json::from_str(json).unwrap();
    match origin {
        MessageOrigin::Channel(ref c) => {
            assert_eq!(c.message_id, 77);
            assert_eq!(c.chat.title.as_deref(), Some("news"));
        }
        other => panic!("expected channel origin, got {other:?}"),
    }
}

#[test]
fn test_message_origin_round_trip() {
    assert_round_trip(MessageOrigin::User(MessageOriginUser {
        date: 1,
        sender_user: user(5),
    }));
    assert_round_trip(MessageOrigin::HiddenUser(MessageOriginHiddenUser {
        date: 2,
        sender_user_name: "someone".into(),
    }));
    assert_round_trip(MessageOrigin::Chat(MessageOriginChat {
        date: 3,
        sender_chat: chat(-5, "group"),
        author_signature: Some("admin".into()),
    }));
    assert_round_trip(MessageOrigin::Channel(MessageOriginChannel {
        date: 4,
        chat: chat(-1006, "channel"),
        message_id: 9,
        author_signature: None,
    }));
}

#[test]
fn test_chat_member_statuses() {
    let kicked: ChatMember = serde_json::from_str(
        r#"{"status": "kicked", "user": {"id": 3, "first_name": "x"}, "until_date": 0}"#,
    )
    .unwrap();
    assert_eq!(kicked.tag(), "kicked");
    assert_eq!(kicked.user().id, 3);
    assert!(!kicked.is_present());

    let restricted: ChatMember = serde_json::from_str(
        r#"{
            "status": "restricted",
            "user": {"id": 4, "first_name": "y"},
            "is_member": true,
            "can_send_messages": false,
            "until_date": 1700000000
        }"#,
    )
    .unwrap();
    assert!(restricted.is_present());
}

#[test]
fn test_chat_member_round_trip() {
    assert_round_trip(ChatMember::Owner(ChatMemberOwner {
        user: user(1),
        is_anonymous: false,
        custom_title: Some("boss".into()),
    }));
    assert_round_trip(ChatMember::Administrator(ChatMemberAdministrator {
        user: user(2),
        can_be_edited: true,
        is_anonymous: false,
        can_manage_chat: true,
        can_delete_messages: true,
        can_restrict_members: false,
        can_promote_members: false,
        can_change_info: true,
        can_invite_users: true,
        custom_title: None,
    }));
    assert_round_trip(ChatMember::Member(ChatMemberMember {
        user: user(3),
        until_date: None,
    }));
    assert_round_trip(ChatMember::Restricted(ChatMemberRestricted {
        user: user(4),
        is_member: false,
        can_send_messages: false,
        until_date: 0,
    }));
    assert_round_trip(ChatMember::Left(ChatMemberLeft { user: user(5) }));
    assert_round_trip(ChatMember::Banned(ChatMemberBanned {
        user: user(6),
        until_date: 42,
    }));
}

#[test]
fn test_reaction_type_round_trip() {
    assert_round_trip(ReactionType::Emoji(ReactionTypeEmoji {
        emoji: "\u{1f44d}".into(),
    }));
    assert_round_trip(ReactionType::CustomEmoji(ReactionTypeCustomEmoji {
        custom_emoji_id: "5368324170671202286".into(),
    }));
    assert_round_trip(ReactionType::Paid(ReactionTypePaid {}));
}

#[test]
fn test_paid_media_round_trip() {
    assert_round_trip(PaidMedia::Preview(PaidMediaPreview {
        width: Some(640),
        height: None,
        duration: None,
    }));
    assert_round_trip(PaidMedia::Photo(PaidMediaPhoto {
        photo: vec![PhotoSize {
            file_id: "p".into(),
            file_unique_id: "up".into(),
            width: 90,
            height: 90,
            file_size: Some(1000),
        }],
    }));
    assert_round_trip(PaidMedia::Video(PaidMediaVideo {
        video: Video {
            file_id: "v".into(),
            file_unique_id: "uv".into(),
            width: 1280,
            height: 720,
            duration: 12,
            mime_type: Some("video/mp4".into()),
            file_size: None,
        },
    }));
}

#[test]
fn test_background_round_trip() {
    let solid = BackgroundFill::Solid(BackgroundFillSolid { color: 0xff0000 });
    assert_round_trip(solid.clone());
    assert_round_trip(BackgroundFill::Gradient(BackgroundFillGradient {
        top_color: 1,
        bottom_color: 2,
        rotation_angle: 45,
    }));
    let freeform = BackgroundFill::FreeformGradient(BackgroundFillFreeformGradient {
        colors: vec![1, 2, 3, 4],
    });
    assert_round_trip(freeform.clone());

    assert_round_trip(BackgroundType::Fill(BackgroundTypeFill {
        fill: solid,
        dark_theme_dimming: 50,
    }));
    assert_round_trip(BackgroundType::Wallpaper(BackgroundTypeWallpaper {
        document: document(),
        dark_theme_dimming: 0,
        is_blurred: Some(true),
        is_moving: None,
    }));
    assert_round_trip(BackgroundType::Pattern(BackgroundTypePattern {
        document: document(),
        fill: freeform,
        intensity: 60,
        is_inverted: None,
        is_moving: Some(false),
    }));
    assert_round_trip(BackgroundType::ChatTheme(BackgroundTypeChatTheme {
        theme_name: "\u{1f384}".into(),
    }));
}

#[test]
fn test_chat_background_nested_type_field() {
    let json = r#"{
        "type": {
            "type": "pattern",
            "document": {"file_id": "d", "file_unique_id": "ud"},
            "fill": {"type": "gradient", "top_color": 1, "bottom_color": 2, "rotation_angle": 0},
            "intensity": 30
        }
    }"#;
    let bg: ChatBackground = serde_json::from_str(json).unwrap();
    match bg.background_type {
        BackgroundType::Pattern(ref p) => {
            assert_eq!(p.intensity, 30);
            assert_eq!(p.fill.tag(), "gradient");
        }
        ref other => panic!("expected pattern, got {other:?}"),
    }
}

#[test]
fn test_chat_boost_source_round_trip() {
    assert_round_trip(ChatBoostSource::Premium(ChatBoostSourcePremium {
        user: user(1),
    }));
    assert_round_trip(ChatBoostSource::GiftCode(ChatBoostSourceGiftCode {
        user: user(2),
    }));
    assert_round_trip(ChatBoostSource::Giveaway(ChatBoostSourceGiveaway {
        giveaway_message_id: 99,
        user: None,
        prize_star_count: Some(500),
        is_unclaimed: Some(true),
    }));
}

#[test]
fn test_chat_boost_removed_source_field() {
    let json = r#"{
        "chat": {"id": -100, "type": "channel"},
        "boost_id": "b1",
        "remove_date": 1700000000,
        "source": {"source": "gift_code", "user": {"id": 8, "first_name": "z"}}
    }"#;
    let removed: ChatBoostRemoved = serde_json::from_str(json).unwrap();
    assert_eq!(removed.source.tag(), "gift_code");
}

#[test]
fn test_unknown_discriminators_are_rejected() {
    let cases: [(&str, fn(&str) -> bool); 6] = [
        (r#"{"type": "forwarded_story", "date": 1}"#, |j| {
            serde_json::from_str::<MessageOrigin>(j).is_err()
        }),
        (r#"{"status": "owner", "user": {"id": 1, "first_name": "a"}}"#, |j| {
            serde_json::from_str::<ChatMember>(j).is_err()
        }),
        (r#"{"type": "sticker"}"#, |j| {
            serde_json::from_str::<ReactionType>(j).is_err()
        }),
        (r#"{"type": "audio"}"#, |j| {
            serde_json::from_str::<PaidMedia>(j).is_err()
        }),
        (r#"{"type": "radial", "color": 1}"#, |j| {
            serde_json::from_str::<BackgroundFill>(j).is_err()
        }),
        (r#"{"source": "lottery"}"#, |j| {
            serde_json::from_str::<ChatBoostSource>(j).is_err()
        }),
    ];
    for (json, rejected) in cases {
        assert!(rejected(json), "should reject {json}");
    }
}

#[test]
fn test_unknown_discriminator_error_names_value() {
    let err = serde_json::from_str::<ReactionType>(r#"{"type": "sticker"}"#).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("sticker"), "{msg}");
    assert!(msg.contains("custom_emoji"), "{msg}");
}

#[test]
fn test_missing_discriminator_is_rejected() {
    assert!(serde_json::from_str::<ReactionType>(r#"{"emoji": "x"}"#).is_err());
    assert!(serde_json::from_str::<ChatMember>(r#"{"user": {"id": 1, "first_name": "a"}}"#).is_err());
}

#[test]
fn test_maybe_inaccessible_branches_on_date() {
    let inaccessible: MaybeInaccessibleMessage = serde_json::from_str(
        r#"{"chat": {"id": 1, "type": "private"}, "message_id": 5, "date": 0}"#,
    )
    .unwrap();
    assert!(inaccessible.accessible().is_none());
    assert_eq!(inaccessible.message_id(), 5);

    let accessible: MaybeInaccessibleMessage = serde_json::from_str(
        r#"{"chat": {"id": 1, "type": "private"}, "message_id": 6, "date": 1700000000, "text": "hi"}"#,
    )
    .unwrap();
    assert_eq!(
        accessible.accessible().and_then(|m| m.text.as_deref()),
        Some("hi")
    );
    assert_eq!(accessible.chat().id, 1);
}

#[test]
fn test_maybe_inaccessible_requires_date() {
    let err = serde_json::from_str::<MaybeInaccessibleMessage>(
        r#"{"chat": {"id": 1, "type": "private"}, "message_id": 5}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("date"));

    assert!(serde_json::from_str::<MaybeInaccessibleMessage>(
        r#"{"chat": {"id": 1}, "message_id": 5, "date": "yesterday"}"#,
    )
    .is_err());
}

#[test]
fn test_maybe_inaccessible_round_trip() {
    let stub = MaybeInaccessibleMessage::Inaccessible(InaccessibleMessage {
        chat: chat(1, "private"),
        message_id: 3,
        date: 0,
    });
    let encoded = serde_json::to_string(&stub).unwrap();
    assert_eq!(
        serde_json::from_str::<MaybeInaccessibleMessage>(&encoded).unwrap(),
        stub
    );
}

#[test]
fn test_message_text_or_caption() {
    let msg: Message = serde_json::from_str(
        r#"{"message_id": 1, "date": 5, "chat": {"id": 1, "type": "private"}, "caption": "look"}"#,
    )
    .unwrap();
    assert_eq!(msg.text_or_caption(), Some("look"));
}

#[test]
fn test_message_with_nested_unions() {
    let json = r#"{
        "message_id": 40,
        "date": 1700000000,
        "chat": {"id": 100, "type": "private"},
        "from": {"id": 100, "is_bot": false, "first_name": "Ada"},
        "forward_origin": {"type": "user", "date": 1690000000, "sender_user": {"id": 7, "first_name": "Bob"}},
        "paid_media": {
            "star_count": 5,
            "paid_media": [{"type": "preview", "width": 10}, {"type": "photo", "photo": []}]
        },
        "pinned_message": {"chat": {"id": 100, "type": "private"}, "message_id": 39, "date": 0},
        "reply_to_message": {
            "message_id": 38,
            "date": 1699999999,
            "chat": {"id": 100, "type": "private"},
            "forward_origin": {"type": "hidden_user", "date": 1, "sender_user_name": "anon"}
        }
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.forward_origin.as_ref().map(|o| o.tag()), Some("user"));
    let paid = msg.paid_media.as_ref().unwrap();
    assert_eq!(paid.paid_media.len(), 2);
    assert_eq!(paid.paid_media[1].tag(), "photo");
    assert!(msg
        .pinned_message
        .as_ref()
        .is_some_and(|p| p.accessible().is_none()));
    let reply = msg.reply_to_message.as_ref().unwrap();
    assert_eq!(
        reply.forward_origin.as_ref().map(|o| o.tag()),
        Some("hidden_user")
    );

    let encoded = serde_json::to_string(&msg).unwrap();
    assert_eq!(serde_json::from_str::<Message>(&encoded).unwrap(), msg);
}

#[test]
fn test_get_updates_response_decodes_in_order() {
    let body = br#"{
        "ok": true,
        "result": [
            {"update_id": 10, "message": {"message_id": 1, "date": 5, "chat": {"id": 1, "type": "private"}, "text": "a"}},
            {"update_id": 11, "callback_query": {
                "id": "cq", "from": {"id": 1, "first_name": "a"}, "chat_instance": "ci", "data": "btn",
                "message": {"chat": {"id": 1, "type": "private"}, "message_id": 1, "date": 0}
            }},
            {"update_id": 12, "my_chat_member": {
                "chat": {"id": -5, "type": "group"}, "from": {"id": 2, "first_name": "b"}, "date": 6,
                "old_chat_member": {"status": "left", "user": {"id": 99, "is_bot": true, "first_name": "bot"}},
                "new_chat_member": {"status": "member", "user": {"id": 99, "is_bot": true, "first_name": "bot"}}
            }},
            {"update_id": 13, "message_reaction": {
                "chat": {"id": 1, "type": "private"}, "message_id": 1, "date": 7,
                "old_reaction": [], "new_reaction": [{"type": "emoji", "emoji": "\u2764"}]
            }},
            {"update_id": 14, "business_connection": {"id": "ignored"}}
        ]
    }"#;
    let response: ApiResponse<Vec<Update>> = serde_json::from_slice(body).unwrap();
    let updates = response.into_result().unwrap();
    let ids: Vec<i64> = updates.iter().map(|u| u.update_id).collect();
    assert_eq!(ids, vec![10, 11, 12, 13, 14]);

    assert_eq!(
        updates[0].kind().map(|k| k.update_type()),
        Some(UpdateType::Message)
    );
    assert_eq!(updates[0].any_message().and_then(|m| m.text.as_deref()), Some("a"));
    assert_eq!(
        updates[1].kind().map(|k| k.update_type()),
        Some(UpdateType::CallbackQuery)
    );
    assert_eq!(updates[1].sender().map(|u| u.id), Some(1));
    match updates[2].kind() {
        Some(UpdateKind::MyChatMember(change)) => {
            assert!(!change.old_chat_member.is_present());
            assert!(change.new_chat_member.is_present());
        }
        other => panic!("expected my_chat_member, got {other:?}"),
    }
    assert_eq!(updates[2].chat().map(|c| c.id), Some(-5));
    assert_eq!(
        updates[3].kind().map(|k| k.update_type()),
        Some(UpdateType::MessageReaction)
    );
    assert!(updates[4].kind().is_none(), "unmodelled payloads have no kind");
}

#[test]
fn test_get_updates_response_with_bad_union_fails() {
    let body = br#"{
        "ok": true,
        "result": [
            {"update_id": 1, "message_reaction": {
                "chat": {"id": 1}, "message_id": 1, "date": 7,
                "old_reaction": [], "new_reaction": [{"type": "sticker"}]
            }}
        ]
    }"#;
    assert!(serde_json::from_slice::<ApiResponse<Vec<Update>>>(body).is_err());
}

#[test]
fn test_api_error_envelope() {
    let body = br#"{
        "ok": false,
        "error_code": 429,
        "description": "Too Many Requests: retry after 3",
        "parameters": {"retry_after": 3}
    }"#;
    let response: ApiResponse<Vec<Update>> = serde_json::from_slice(body).unwrap();
    match response.into_result() {
        Err(CourierError::Api {
            code,
            description,
            retry_after,
        }) => {
            assert_eq!(code, 429);
            assert!(description.starts_with("Too Many Requests"));
            assert_eq!(retry_after, Some(3));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[test]
fn test_ok_envelope_without_result_is_decode_error() {
    let response: ApiResponse<Vec<Update>> = serde_json::from_slice(br#"{"ok": true}"#).unwrap();
    assert!(matches!(
        response.into_result(),
        Err(CourierError::Decode(_))
    ));
}

#[test]
fn test_update_type_names() {
    for t in UpdateType::ALL {
        assert_eq!(t.as_str().parse::<UpdateType>().unwrap(), t);
        assert_eq!(
            serde_json::to_value(t).unwrap(),
            serde_json::Value::String(t.to_string())
        );
    }
    assert!(matches!(
        "inline_query".parse::<UpdateType>(),
        Err(CourierError::Validation(_))
    ));
}

#[test]
fn test_empty_update_has_no_kind() {
    let update = Update::empty(5);
    assert!(update.kind().is_none());
    assert!(update.sender().is_none());
    assert!(update.chat().is_none());
}
