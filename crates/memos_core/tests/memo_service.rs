use chrono::{NaiveDate, NaiveDateTime};
use memos_core::{
    AppContext, FilterSpec, FsVault, HostError, HostResult, Memo, MemoAction, MemoMutator,
    MemoService, MemoServiceError, MemoSettings, MemoType, MemoWriter, RemoteMemos, RemoteStore,
};
use std::cell::RefCell;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 20)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn memo(id: &str, hour: u32, content: &str) -> Memo {
    Memo::new(id, content, MemoType::Journal, &at(hour, 0), "2024-08-20.md")
}

#[derive(Default)]
struct FakeRemote {
    memos: RefCell<Vec<Memo>>,
    comments: RefCell<Vec<Memo>>,
    deleted: RefCell<Vec<Memo>>,
    offline: RefCell<bool>,
    hidden: RefCell<Vec<String>>,
}

impl FakeRemote {
    fn check_online(&self) -> HostResult<()> {
        if *self.offline.borrow() {
            return Err(HostError::Unavailable("offline".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for FakeRemote {
    fn list_memos(&self) -> HostResult<RemoteMemos> {
        self.check_online()?;
        Ok(RemoteMemos {
            memos: self.memos.borrow().clone(),
            comment_memos: self.comments.borrow().clone(),
        })
    }

    fn list_deleted_memos(&self) -> HostResult<Vec<Memo>> {
        self.check_online()?;
        Ok(self.deleted.borrow().clone())
    }

    fn hide(&self, id: &str) -> HostResult<()> {
        self.check_online()?;
        self.hidden.borrow_mut().push(id.to_string());
        Ok(())
    }

    fn restore(&self, id: &str) -> HostResult<()> {
        self.check_online()?;
        self.hidden.borrow_mut().retain(|hidden| hidden != id);
        Ok(())
    }

    fn delete(&self, _id: &str) -> HostResult<()> {
        self.check_online()
    }
}

#[test]
fn failed_fetch_keeps_last_known_collection() {
    let remote = FakeRemote::default();
    remote.memos.borrow_mut().push(memo("202408200900001", 9, "first"));
    remote
        .comments
        .borrow_mut()
        .push(memo("202408201000001", 10, "comment: 202408200900001 ok"));

    let mut context = AppContext::new(MemoSettings::default());
    let mut service = MemoService::new(&mut context, &remote);
    assert_eq!(service.fetch_all_memos().unwrap().len(), 1);

    *remote.offline.borrow_mut() = true;
    let failed = service.fetch_all_memos();
    assert!(matches!(failed, Err(MemoServiceError::RemoteFailure(_))));
    assert_eq!(service.context().get_state().memos.len(), 1);
    assert_eq!(service.context().get_state().comment_memos.len(), 1);
    assert_eq!(service.comment_memos_for("202408200900001").len(), 1);
}

#[test]
fn hide_only_removes_after_remote_accepts() {
    let remote = FakeRemote::default();
    let mut context = AppContext::new(MemoSettings::default());
    context.dispatch(MemoAction::SetMemos(vec![
        memo("202408201100001", 11, "b"),
        memo("202408200900001", 9, "a"),
    ]));
    let mut service = MemoService::new(&mut context, &remote);

    *remote.offline.borrow_mut() = true;
    assert!(service.hide_memo("202408200900001").is_err());
    assert!(service.get_memo_by_id("202408200900001").is_some());

    *remote.offline.borrow_mut() = false;
    service.hide_memo("202408200900001").unwrap();
    assert!(service.get_memo_by_id("202408200900001").is_none());
    assert_eq!(remote.hidden.borrow().as_slice(), ["202408200900001"]);

    service.restore_memo("202408200900001").unwrap();
    assert!(remote.hidden.borrow().is_empty());
}

#[test]
fn deleted_memos_are_sorted_by_deletion_time() {
    let remote = FakeRemote::default();
    let mut early = memo("202408200900001", 9, "early");
    early.soft_delete(&at(12, 0));
    let mut late = memo("202408201000001", 10, "late");
    late.soft_delete(&at(15, 0));
    remote.deleted.borrow_mut().extend([early, late]);

    let mut context = AppContext::default();
    let service = MemoService::new(&mut context, &remote);
    let deleted = service.fetch_deleted_memos().unwrap();
    assert_eq!(deleted[0].content, "late");
    assert_eq!(deleted[1].content, "early");
}

#[test]
fn store_actions_keep_feed_newest_first() {
    let mut context = AppContext::new(MemoSettings::default());
    context.dispatch(MemoAction::InsertMemo(memo("202408200900001", 9, "nine")));
    context.dispatch(MemoAction::InsertMemo(memo("202408201100001", 11, "eleven")));
    context.dispatch(MemoAction::InsertMemo(memo("202408201000001", 10, "ten")));

    let contents: Vec<&str> = context
        .get_state()
        .memos
        .iter()
        .map(|memo| memo.content.as_str())
        .collect();
    assert_eq!(contents, vec!["eleven", "ten", "nine"]);

    context.dispatch(MemoAction::EditMemo(memo("202408201000001", 10, "ten #edited")));
    context.dispatch(MemoAction::DeleteMemoById("202408200900001".to_string()));
    context.set_filter(FilterSpec::default().with_tag("edited"));

    let page = context.feed(1);
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].content, "ten #edited");
}

#[test]
fn tag_state_counts_each_memo_once() {
    let remote = FakeRemote::default();
    let mut context = AppContext::default();
    context.dispatch(MemoAction::SetMemos(vec![
        memo("202408200900001", 9, "#work #work/deep review"),
        memo("202408201000001", 10, "#work standup"),
        memo("202408201100001", 11, "untagged"),
    ]));
    let mut service = MemoService::new(&mut context, &remote);
    service.update_tags_state();

    let state = service.context().get_state();
    assert_eq!(state.tags, vec!["work".to_string(), "work/deep".to_string()]);
    assert_eq!(state.tag_counts.get("work"), Some(&2));
    assert_eq!(state.tag_counts.get("work/deep"), Some(&1));
}

#[test]
fn linked_memos_reference_the_target_id() {
    let remote = FakeRemote::default();
    let mut context = AppContext::default();
    context.dispatch(MemoAction::SetMemos(vec![
        memo("202408201000001", 10, "see [@first](202408200900001)"),
        memo("202408200900001", 9, "first"),
        memo("202408201100001", 11, "unrelated"),
    ]));
    let service = MemoService::new(&mut context, &remote);

    let linked = service.linked_memos("202408200900001");
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "202408201000001");
}

#[test]
fn create_and_update_flow_through_files_and_context() {
    let dir = tempfile::tempdir().unwrap();
    let vault = FsVault::new(dir.path()).with_daily_note_template("# Journal\n");
    let settings = MemoSettings::default();
    let writer = MemoWriter::new(&vault, &vault, &settings);
    let mutator = MemoMutator::new(&vault, &vault);

    let remote = FakeRemote::default();
    let mut context = AppContext::new(settings.clone());
    let mut service = MemoService::new(&mut context, &remote);

    let created = service
        .create_memo(&writer, "water plants", true, Some(at(7, 30)))
        .unwrap();
    assert_eq!(service.context().get_state().memos.len(), 1);

    let updated = service
        .update_memo(&mutator, &created.id, "water plants", "water all plants", None, None)
        .unwrap();
    assert_eq!(updated.memo_type, MemoType::TaskTodo);

    let stored = service.get_memo_by_id(&created.id).unwrap();
    assert_eq!(stored.content, "water all plants");
}

#[test]
fn comment_memo_is_linked_to_its_target() {
    let dir = tempfile::tempdir().unwrap();
    let vault = FsVault::new(dir.path()).with_daily_note_template("# Journal\n");
    let settings = MemoSettings::default();
    let writer = MemoWriter::new(&vault, &vault, &settings);

    let remote = FakeRemote::default();
    let mut context = AppContext::new(settings.clone());
    let mut service = MemoService::new(&mut context, &remote);

    let target = service
        .create_memo(&writer, "plan trip", false, Some(at(8, 0)))
        .unwrap();
    let comment = service
        .create_comment_memo(&writer, &target.id, "book train", Some(at(8, 15)))
        .unwrap();

    assert_eq!(comment.link_id, target.id);
    assert!(comment.is_comment());
    assert_eq!(comment.content, format!("comment: {} book train", target.id));

    let state = service.context().get_state();
    assert_eq!(state.memos.len(), 1);
    assert_eq!(state.comment_memos.len(), 1);
    assert_eq!(service.get_comment_memo_by_id(&comment.id).unwrap().link_id, target.id);
    assert_eq!(service.comment_memos_for(&target.id).len(), 1);
}
