mod chat_vm;
mod dashboard_vm;
mod exam_vm;
mod markdown_vm;
mod practice_vm;
mod results_vm;

pub use chat_vm::{
    ChatBody, ChatBubbleVm, CommunityLineVm, map_chat_bubble, map_community_line,
};
pub use dashboard_vm::{SelectOptionVm, domain_options, exam_options};
pub use exam_vm::{
    ConfirmSubmitVm, DomainProgressVm, ExamOptionVm, ExamScreenVm, NavigatorCellVm,
    map_exam_screen,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use practice_vm::{PracticeOptionVm, PracticeVm, map_practice_round};
pub use results_vm::{ResultsVm, map_results};
