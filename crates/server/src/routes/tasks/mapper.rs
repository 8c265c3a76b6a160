use db::models::task::Task;

use super::dto::TaskDto;

pub fn to_dto(task: Task) -> TaskDto {
    TaskDto {
        id: task.id,
        title: task.title,
        description: task.description,
        completed: task.completed,
    }
}

/// Copies every field, `id` included. Callers creating a task clear the id
/// themselves.
pub fn to_record(dto: TaskDto) -> Task {
    Task {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        completed: dto.completed,
    }
}

/// Overwrites everything except the id.
pub fn apply_update(dto: &TaskDto, task: &mut Task) {
    task.title = dto.title.clone();
    task.description = dto.description.clone();
    task.completed = dto.completed;
}
